use std::collections::BTreeMap;

use super::{
    AnalysisDetail, BucketVariants, CategoryContent, ConversationTips, LanguageContent,
    ReportLabels, TipTopic,
};
use crate::workflows::assessment::domain::{Category, Language};

const FOOTER: &str = "Generated via Motivation Catalyst";

fn detail(analysis: &str, actions: [&str; 2], ai_tip: Option<&str>) -> AnalysisDetail {
    AnalysisDetail {
        analysis: analysis.to_string(),
        actions: actions.iter().map(|action| action.to_string()).collect(),
        ai_tip: ai_tip.map(str::to_string),
    }
}

fn tips(entries: [(TipTopic, &str); 4]) -> BTreeMap<TipTopic, String> {
    entries
        .into_iter()
        .map(|(topic, tip)| (topic, tip.to_string()))
        .collect()
}

pub(super) fn content(language: Language) -> LanguageContent {
    match language {
        Language::En => english(),
        Language::He => hebrew(),
    }
}

fn english() -> LanguageContent {
    let mut categories = BTreeMap::new();

    categories.insert(
        Category::Autonomy,
        CategoryContent {
            label: "Autonomy".to_string(),
            title: "Autonomy".to_string(),
            employee: BucketVariants {
                low: detail(
                    "It seems you feel micromanaged or lack the ability to influence your own schedule and workflows.",
                    ["Request a boundary-setting meeting", "Suggest improvements to existing work processes"],
                    Some("Try using \"Time Blocking\" to create independent workspace for yourself. In your next meeting with your manager, propose one task you can take full end-to-end responsibility for."),
                ),
                high: detail(
                    "You have a strong sense of freedom and high ownership over your tasks and projects.",
                    ["Continue initiating new projects", "Serve as a role model for self-management in the team"],
                    Some("Leverage your freedom to research new tools that can upgrade team performance. This is the time to lead initiatives that go beyond your formal job description."),
                ),
            },
            manager: BucketVariants {
                low: detail(
                    "Employee feels restricted. A lack of autonomy leads to rapid burnout.",
                    ["Define the 'what' and release the 'how'", "Involve the employee in decision-making processes"],
                    None,
                ),
                high: detail(
                    "Employee feels fully trusted. This is a powerful growth engine.",
                    ["Delegate more complex authorities", "Avoid over-involvement in routine tasks"],
                    None,
                ),
            },
        },
    );

    categories.insert(
        Category::Competence,
        CategoryContent {
            label: "Competence".to_string(),
            title: "Competence".to_string(),
            employee: BucketVariants {
                low: detail(
                    "You might feel that the current challenges are greater than the tools or training you have at your disposal.",
                    ["Identify specific training needs and request them", "Celebrate small daily successes to build momentum"],
                    Some("Break large tasks into 15-minute micro-tasks. Each small checkmark builds your sense of competence. Look for 10-minute \"Micro-learning\" daily on a topic that interests you."),
                ),
                high: detail(
                    "You feel professional, sharp, and highly capable of delivering quality results for the team.",
                    ["Seek new 'stretch' challenges that push your limits", "Serve as a mentor for other team members"],
                    Some("This is the perfect time to request a \"Stretch Assignment\" that exposes you to new areas of the organization. Your ability to teach others is the best way to further refine your own expertise."),
                ),
            },
            manager: BucketVariants {
                low: detail(
                    "Employee is experiencing frustration or fear of failure.",
                    ["Break tasks into small, achievable goals", "Provide constructive and immediate feedback"],
                    None,
                ),
                high: detail(
                    "Employee is confident in their abilities and delivers high-quality results.",
                    ["Explore promotion or expanded responsibility", "Praise their specific professional skills"],
                    None,
                ),
            },
        },
    );

    categories.insert(
        Category::Relatedness,
        CategoryContent {
            label: "Relatedness".to_string(),
            title: "Relatedness".to_string(),
            employee: BucketVariants {
                low: detail(
                    "You may feel socially disconnected or that your contributions are not fully recognized by your peers.",
                    ["Initiate informal social interactions", "Find a partner for regular professional consultation"],
                    Some("Schedule a 10-minute \"virtual or physical coffee\" with a colleague you haven't spoken to in a while. Sharing small difficulties can create quick connections and reduce isolation."),
                ),
                high: detail(
                    "You feel like an integral part of the team and receive genuine support from your colleagues.",
                    ["Strengthen existing connections", "Be a bridge for others who might feel excluded"],
                    Some("Use your strong connections to help new hires integrate. Your sense of meaning will grow as you become the \"glue\" that keeps the team united."),
                ),
            },
            manager: BucketVariants {
                low: detail(
                    "Employee feels isolated. Lack of belonging harms commitment.",
                    ["Schedule personal 1:1 meetings (not just task-focused)", "Include them in collaborative thinking groups"],
                    None,
                ),
                high: detail(
                    "Employee is well-connected to the organizational culture and the team.",
                    ["Continue fostering a safe and supportive environment", "Express public appreciation for their team contribution"],
                    None,
                ),
            },
        },
    );

    LanguageContent {
        labels: ReportLabels {
            profile_title: "Motivation Profile".to_string(),
            analysis: "Analysis".to_string(),
            actions: "Recommended Actions".to_string(),
            ai_tip: "Strategic AI Tip".to_string(),
            manager_title: "Manager Recommendations".to_string(),
            self_title: "Personal Insights".to_string(),
            conversation_title: "Conversation Tip".to_string(),
            footer: FOOTER.to_string(),
        },
        categories,
        conversation_tips: ConversationTips {
            employee: tips([
                (TipTopic::Autonomy, "\"Hi [Manager], I'd like to discuss my workflows. I feel I could contribute more with more flexibility.\""),
                (TipTopic::Competence, "\"Hi [Manager], I'm facing challenges with recent tasks and would appreciate guidance/tools.\""),
                (TipTopic::Relatedness, "\"Hi [Manager], I've felt disconnected lately. Can we brainstorm ways to collaborate more closely?\""),
                (TipTopic::High, "\"Hi [Manager], I feel good professionally and would love to discuss new challenges.\""),
            ]),
            manager: tips([
                (TipTopic::Autonomy, "\"Hi [Employee], I want you to feel ownership. Let's chat about where I can step back.\""),
                (TipTopic::Competence, "\"Hi [Employee], do you have everything needed to succeed? Any training/tools missing?\""),
                (TipTopic::Relatedness, "\"Hi [Employee], we haven't connected lately. Let's grab coffee; I want to hear how you are.\""),
                (TipTopic::High, "\"Hi [Employee], I appreciate your work. Let's think about how to maintain this energy.\""),
            ]),
        },
    }
}

fn hebrew() -> LanguageContent {
    let mut categories = BTreeMap::new();

    categories.insert(
        Category::Autonomy,
        CategoryContent {
            label: "אוטונומיה".to_string(),
            title: "אוטונומיה (בחירה ושליטה)".to_string(),
            employee: BucketVariants {
                low: detail(
                    "נראה שאתה מרגיש \"מיקרו-ניהול\" או חוסר יכולת להשפיע על סדר היום שלך.",
                    ["בקש פגישת הגדרת גבולות גזרה", "הצע שיפורים בתהליכי העבודה"],
                    Some("נסה שיטת \"ניהול יומן חוסם\" (Time Blocking) כדי לייצר לעצמך מרחב עבודה עצמאי. בשיחה הבאה עם המנהל, הצע משימה אחת שאתה לוקח עליה אחריות מלאה מהתחלה ועד הסוף."),
                ),
                high: detail(
                    "יש לך תחושת חופש ובעלות גבוהה על המשימות שלך.",
                    ["המשך ליזום פרויקטים חדשים", "שמש דוגמה לניהול עצמי בצוות"],
                    Some("נצל את החופש שלך כדי לחקור כלים חדשים שיכולים לשדרג את ביצועי הצוות. זה הזמן להוביל יוזמות שמעבר להגדרת התפקיד הפורמלית."),
                ),
            },
            manager: BucketVariants {
                low: detail(
                    "העובד מרגיש כבול. חוסר אוטונומיה מוביל לשחיקה מהירה.",
                    ["הגדר את ה\"מה\" ושחרר את ה\"איך\"", "שתף את העובד בקבלת החלטות"],
                    None,
                ),
                high: detail(
                    "העובד מרגיש אמון מלא. זהו מנוע צמיחה חזק.",
                    ["האצל סמכויות מורכבות יותר", "הימנע ממעורבות יתר במשימות שגורות"],
                    None,
                ),
            },
        },
    );

    categories.insert(
        Category::Competence,
        CategoryContent {
            label: "מסוגלות".to_string(),
            title: "מסוגלות (יכולת והישגים)".to_string(),
            employee: BucketVariants {
                low: detail(
                    "ייתכן שאתה מרגיש שהאתגרים גדולים מהכלים שיש לך כרגע.",
                    ["זהה צורך בהכשרה ובקש אותה", "חגוג הצלחות קטנות ביום-יום"],
                    Some("פרק משימות גדולות למשימות קטנות של 15 דקות. כל וי (V) קטן כזה בונה את תחושת המסוגלות שלך מחדש. חפש \"למידת מיקרו\" (Micro-learning) של 10 דקות ביום בנושא שמעניין אותך."),
                ),
                high: detail(
                    "אתה מרגיש מקצועי, חד ובעל יכולת לתרום לצוות.",
                    ["חפש אתגרים חדשים שמותחים אותך", "שמש כמנטור לעובדים אחרים"],
                    Some("זה הזמן המושלם לבקש פרויקט \"מתיחה\" (Stretch Assignment) שיחשוף אותך לתחומים חדשים בארגון. היכולת שלך ללמד אחרים היא הדרך הטובה ביותר לשכלל את המומחיות שלך."),
                ),
            },
            manager: BucketVariants {
                low: detail(
                    "העובד חווה תסכול או חשש מחוסר הצלחה.",
                    ["פרק משימות ליעדים קטנים וברי השגה", "ספק משוב בונה ומיידי"],
                    None,
                ),
                high: detail(
                    "העובד בטוח ביכולותיו ומספק תוצאות איכותיות.",
                    ["בדוק אפשרות לקידום או הרחבת אחריות", "שבח את המיומנות הספציפית שלו"],
                    None,
                ),
            },
        },
    );

    categories.insert(
        Category::Relatedness,
        CategoryContent {
            label: "שייכות".to_string(),
            title: "שייכות (חיבור ומשמעות)".to_string(),
            employee: BucketVariants {
                low: detail(
                    "אתה עשוי להרגיש מנותק חברתית או שהעבודה שלך לא מקבלת הערכה.",
                    ["יזום אינטראקציות חברתיות לא פורמליות", "מצא שותף להתייעצות קבועה"],
                    Some("קבע \"קפה וירטואלי\" או פיזי של 10 דקות עם קולגה שלא דיברת איתו מזמן. השיתוף בקשיים קטנים יכול לייצר חיבור מהיר ולהפחית את תחושת הבידוד."),
                ),
                high: detail(
                    "אתה מרגיש חלק בלתי נפרד מהצוות וזוכה לתמיכה.",
                    ["חזק את הקשרים הקיימים", "הייה הגורם המקשר לאחרים שמרגישים מחוץ לעניינים"],
                    Some("השתמש בחיבור החזק שלך כדי לעזור לעובדים חדשים להיקלט. תחושת המשמעות שלך תגדל ככל שתהיה \"הדבק\" ששומר על הצוות מאוחד."),
                ),
            },
            manager: BucketVariants {
                low: detail(
                    "העובד מרגיש מבודד. חוסר שייכות פוגע במחויבות.",
                    ["קבע פגישות 1:1 אישיות (לא רק על משימות)", "שלב אותו בצוותי חשיבה משותפים"],
                    None,
                ),
                high: detail(
                    "העובד מחובר היטב לתרבות הארגונית ולצוות.",
                    ["המשך לטפח סביבה בטוחה ותומכת", "הבע הערכה פומבית על תרומתו לצוות"],
                    None,
                ),
            },
        },
    );

    LanguageContent {
        labels: ReportLabels {
            profile_title: "פרופיל מוטיבציה אישי".to_string(),
            analysis: "ניתוח".to_string(),
            actions: "פעולות מומלצות".to_string(),
            ai_tip: "טיפ AI אסטרטגי".to_string(),
            manager_title: "המלצות למנהל".to_string(),
            self_title: "תובנות אישיות".to_string(),
            conversation_title: "טיפ לשיחה".to_string(),
            footer: FOOTER.to_string(),
        },
        categories,
        conversation_tips: ConversationTips {
            employee: tips([
                (TipTopic::Autonomy, "\"היי [שם המנהל], הייתי רוצה לקבוע זמן לדבר על תהליכי העבודה שלי. אני מרגיש שאוכל לתרום יותר אם תהיה לי יותר גמישות בדרך הביצוע.\""),
                (TipTopic::Competence, "\"היי [שם המנהל], אני נתקל באתגרים במשימות האחרונות והייתי שמח לקבל הכוונה או כלים נוספים שיעזרו לי להצליח.\""),
                (TipTopic::Relatedness, "\"היי [שם המנהל], אני מרגיש לאחרונה קצת מנותק מהצוות. האם אפשר לחשוב יחד על דרכים לשיתוף פעולה הדוק יותר בפרויקטים הקרובים?\""),
                (TipTopic::High, "\"היי [שם המנהל], אני מרגיש שאני נמצא במקום טוב מבחינה מקצועית והייתי שמח לדון באפשרויות להתפתח ולקחת על עצמי אתגרים חדשים.\""),
            ]),
            manager: tips([
                (TipTopic::Autonomy, "\"היי [שם העובד], חשוב לי שתרגיש בעלות על המשימות שלך. בוא נשב ונדבר על איפה אני יכול לשחרר קצת ולתת לך יותר מרחב פעולה.\""),
                (TipTopic::Competence, "\"היי [שם העובד], אני רוצה לוודא שיש לך את כל מה שצריך כדי להצליח. האם יש הכשרה או כלים שחסרים לך כרגע?\""),
                (TipTopic::Relatedness, "\"היי [שם העובד], שמתי לב שאנחנו פחות מתקשרים לאחרונה. בוא נצא לקפה, חשוב לי לשמוע איך אתה מרגיש בצוות ברמה האישית.\""),
                (TipTopic::High, "\"היי [שם העובד], אני מאוד מעריך את העבודה שלך לאחרונה. בוא נחשוב יחד איך משמרים את האנרגיה הטובה הזו ומה הצעד הבא עבורך.\""),
            ]),
        },
    }
}
