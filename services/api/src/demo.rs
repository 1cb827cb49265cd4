use crate::infra::{
    load_content, parse_language, parse_profile, parse_scope, AssessmentContent,
    InMemoryFeedbackRepository,
};
use clap::Args;
use motivation_catalyst::config::AppConfig;
use motivation_catalyst::error::AppError;
use motivation_catalyst::workflows::assessment::{
    configured_sink, validate_answers, AnswerSheetImporter, AssessmentResultsView,
    AssessmentSession, Category, DemoProfile, EventSink, FeedbackRating, FeedbackRecord,
    FeedbackRepository, InMemoryEventSink, Language, ReportScope, RespondentDetails, WizardEvent,
    WizardPhase,
};
use motivation_catalyst::workflows::assessment::domain::{MAX_RATING, MIN_RATING};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct TakeArgs {
    /// Questionnaire language (he or en). Defaults to the configured language.
    #[arg(long, value_parser = parse_language)]
    pub(crate) lang: Option<Language>,
    /// Employee name; prompted for when omitted.
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Manager name; prompted for when omitted.
    #[arg(long)]
    pub(crate) manager: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Demo answer set: high, mid, or at-risk
    #[arg(long, value_parser = parse_profile)]
    pub(crate) profile: DemoProfile,
    /// Report language (he or en). Defaults to the configured language.
    #[arg(long, value_parser = parse_language)]
    pub(crate) lang: Option<Language>,
    /// Report section to print: full, employee, or manager
    #[arg(long, value_parser = parse_scope, default_value = "full")]
    pub(crate) scope: ReportScope,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// CSV answer sheet with a `respondent` column followed by question ids
    pub(crate) csv: PathBuf,
    /// Language used for category labels. Defaults to the configured language.
    #[arg(long, value_parser = parse_language)]
    pub(crate) lang: Option<Language>,
    /// Fail when any respondent left a question unanswered
    #[arg(long)]
    pub(crate) strict: bool,
}

pub(crate) fn run_take(args: TakeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let content = load_content(&config.assessment)?;
    let language = args.lang.unwrap_or(config.assessment.default_language);
    let mut session = AssessmentSession::new(
        content.catalog.clone(),
        content.narrative.clone(),
        configured_sink(&config.webhook),
        config.assessment.app_id.clone(),
        language,
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    let results = take_interactive(&mut session, args, &mut input, &mut output)?;
    let report = session.export_report(ReportScope::Full)?;
    render_results(&mut output, &results, &report)?;

    let feedback = InMemoryFeedbackRepository::default();
    collect_feedback(&session, &feedback, &mut input, &mut output)?;
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let content = load_content(&config.assessment)?;
    let language = args.lang.unwrap_or(config.assessment.default_language);
    let sink = Arc::new(InMemoryEventSink::default());
    let mut session = AssessmentSession::new(
        content.catalog.clone(),
        content.narrative.clone(),
        sink.clone(),
        config.assessment.app_id.clone(),
        language,
    );

    session.dispatch(WizardEvent::Demo(args.profile));
    let results = session.results()?;
    let report = session.export_report(args.scope)?;

    let mut output = io::stdout().lock();
    writeln!(output, "Motivation Catalyst demo ({})", args.profile)?;
    render_results(&mut output, &results, &report)?;
    writeln!(
        output,
        "\n{} event(s) captured in memory for this run",
        sink.events().len()
    )?;
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let content = load_content(&config.assessment)?;
    let language = args.lang.unwrap_or(config.assessment.default_language);

    let mut output = io::stdout().lock();
    score_sheet(&content, &args, language, &mut output)
}

fn score_sheet<W: Write>(
    content: &AssessmentContent,
    args: &ScoreArgs,
    language: Language,
    output: &mut W,
) -> Result<(), AppError> {
    let sheet = AnswerSheetImporter::from_path(&args.csv, &content.catalog)?;
    writeln!(
        output,
        "Scored {} respondent(s) from {}",
        sheet.len(),
        args.csv.display()
    )?;

    for row in &sheet {
        if args.strict {
            validate_answers(&row.answers, &content.catalog)?;
        }
        let scored = row.score(&content.catalog);
        let mut columns = Vec::with_capacity(3);
        for category in Category::ordered() {
            let label = content.narrative.category_label(language, category)?;
            columns.push(format!(
                "{label} {} ({})",
                scored.scores.formatted(category),
                scored.scores.bucket(category).key()
            ));
        }
        writeln!(
            output,
            "- {} [{}/{} answered]: {}",
            scored.respondent,
            scored.answered,
            content.catalog.len(),
            columns.join(" | ")
        )?;
    }

    Ok(())
}

/// Drives the wizard from line-based input until the analysis phase is reached.
fn take_interactive<S, R, W>(
    session: &mut AssessmentSession<S>,
    args: TakeArgs,
    input: &mut R,
    output: &mut W,
) -> Result<AssessmentResultsView, AppError>
where
    S: EventSink + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut details = RespondentDetails {
        employee_name: args.name.unwrap_or_default(),
        manager_name: args.manager.clone().unwrap_or_default(),
        ..RespondentDetails::default()
    };
    while !details.has_employee_name() {
        details.employee_name = prompt(input, output, "Employee name: ")?;
    }
    if args.manager.is_none() {
        details.manager_name = prompt(input, output, "Manager name (optional): ")?;
    }

    session.dispatch(WizardEvent::EditDetails(details));
    session.dispatch(WizardEvent::Start);

    loop {
        let index = match session.state().phase {
            WizardPhase::Assessment { index } => index,
            WizardPhase::Analysis { .. } => break,
            WizardPhase::Welcome => {
                session.dispatch(WizardEvent::Start);
                continue;
            }
        };
        let Some(question) = session.state().current_question(session.catalog()).cloned()
        else {
            break;
        };

        let previous = session
            .state()
            .answers
            .get(question.id)
            .map(|rating| format!(" [current: {rating}]"))
            .unwrap_or_default();
        writeln!(
            output,
            "\n({}/{}) {}{}",
            index + 1,
            session.catalog().len(),
            question.text.get(session.state().language),
            previous
        )?;
        let raw = prompt(
            input,
            output,
            &format!("Rate {MIN_RATING}-{MAX_RATING}, or b to go back: "),
        )?;

        if raw.eq_ignore_ascii_case("b") {
            if index == 0 {
                writeln!(output, "Already at the first question.")?;
            } else {
                session.dispatch(WizardEvent::Back);
            }
            continue;
        }

        match raw.parse::<u8>() {
            Ok(rating) if (MIN_RATING..=MAX_RATING).contains(&rating) => {
                session.dispatch(WizardEvent::Answer {
                    question_id: question.id,
                    rating,
                });
            }
            _ => writeln!(
                output,
                "Please enter a whole number from {MIN_RATING} to {MAX_RATING}."
            )?,
        }
    }

    Ok(session.results()?)
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<String> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before the questionnaire was finished",
        ));
    }
    Ok(line.trim().to_string())
}

/// Asks for a thumbs rating over the printed results; closed input or a blank answer skips it.
fn collect_feedback<S, F, R, W>(
    session: &AssessmentSession<S>,
    repository: &F,
    input: &mut R,
    output: &mut W,
) -> Result<Option<FeedbackRecord>, AppError>
where
    S: EventSink + ?Sized,
    F: FeedbackRepository + ?Sized,
    R: BufRead,
    W: Write,
{
    let rating = loop {
        let raw = match prompt(
            input,
            output,
            "\nWere these insights useful? (+ / -, enter to skip): ",
        ) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match raw.as_str() {
            "" => return Ok(None),
            "+" => break FeedbackRating::ThumbsUp,
            "-" => break FeedbackRating::ThumbsDown,
            _ => writeln!(output, "Please answer + or -.")?,
        }
    };

    let comment = match prompt(input, output, "Comment (optional): ") {
        Ok(comment) => comment,
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => String::new(),
        Err(err) => return Err(err.into()),
    };

    match session.submit_feedback(repository, rating, &comment) {
        Ok(record) => {
            writeln!(output, "Thanks for the feedback.")?;
            Ok(Some(record))
        }
        Err(error) => {
            writeln!(output, "Feedback could not be saved: {error}")?;
            Ok(None)
        }
    }
}

fn render_results<W: Write>(
    output: &mut W,
    results: &AssessmentResultsView,
    report: &str,
) -> io::Result<()> {
    writeln!(output, "\nScores")?;
    for entry in &results.categories {
        writeln!(
            output,
            "- {}: {} ({})",
            entry.label,
            entry.score_label,
            entry.bucket.key()
        )?;
    }

    writeln!(output, "\n{report}")?;

    writeln!(output, "\n{}", results.conversation_title)?;
    for starter in &results.conversation_starters {
        writeln!(output, "- {}: {}", starter.role.key(), starter.tip)?;
    }
    Ok(())
}
