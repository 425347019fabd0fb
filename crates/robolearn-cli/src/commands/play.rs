//! The `robolearn play` command.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use robolearn_core::config::{load_config_from, ReportFormat};
use robolearn_core::model::{Outcome, SectionId, View};
use robolearn_core::report::SessionReport;
use robolearn_core::runner::{Advance, Badge, Feedback, ModuleRunner, OptionMark};
use robolearn_core::session::Session;
use robolearn_report::html::write_html_report;

use super::load_catalog;
use super::summary::print_summary;

pub fn execute(
    catalog_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<String>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog = load_catalog(catalog_path.as_deref().or(config.catalog.as_deref()))?;
    let format = match format {
        Some(f) => f.parse::<ReportFormat>().map_err(|e: String| anyhow::anyhow!("{}", e))?,
        None => config.report_format,
    };
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let mut session = Session::new(catalog);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();

    run_session(&mut session, &mut input, &mut out, config.show_theory)?;

    let report = SessionReport::from_session(&session);
    save_reports(&report, &output, format)?;

    Ok(())
}

enum HomeChoice {
    Section(SectionId),
    Results,
    StartOver,
    Quit,
}

enum SummaryChoice {
    Review,
    StartOver,
    Finish,
}

enum ModuleStep {
    Answered,
    Home,
    Quit,
}

/// Drive the session from the home screen until the learner finishes.
///
/// Every exit path ends on the summary: `q` or end of input anywhere
/// outside the summary jumps there, leaving unanswered modules unanswered.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    out: &mut W,
    show_theory: bool,
) -> Result<()> {
    loop {
        match session.view() {
            View::Home => match prompt_home(session, input, out)? {
                HomeChoice::Section(section) => session.navigate_to(section.view()),
                HomeChoice::Results => session.navigate_to(View::Summary),
                HomeChoice::StartOver => session.reset_progress(),
                HomeChoice::Quit => break,
            },
            View::Joints | View::Links => match play_module(session, input, out, show_theory)? {
                ModuleStep::Answered => {}
                ModuleStep::Home => session.review_answers(),
                ModuleStep::Quit => break,
            },
            View::Summary => {
                render_summary(session, out)?;
                match prompt_summary(input, out)? {
                    SummaryChoice::Review => session.review_answers(),
                    SummaryChoice::StartOver => session.reset_progress(),
                    SummaryChoice::Finish => return Ok(()),
                }
            }
        }
    }

    if !session.all_answered() {
        writeln!(out, "\nLeaving the quiz early.")?;
    }
    session.navigate_to(View::Summary);
    render_summary(session, out)
}

fn status_mark(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Correct => "✓",
        Outcome::Incorrect => "✗",
        Outcome::Unanswered => "—",
    }
}

fn render_home<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let catalog = session.catalog();
    writeln!(out, "\n{}", catalog.name())?;
    writeln!(
        out,
        "Progress: {}/{} completed ({:.0}%)",
        session.answered_count(),
        catalog.len(),
        session.progress_percentage()
    )?;

    for (i, section) in catalog.sections().iter().enumerate() {
        writeln!(out, "\n  {}) {} ({} modules)", i + 1, section.name(), section.len())?;
        for module in &section.modules {
            let outcome = session.scores().get(&module.id).unwrap_or_default();
            writeln!(
                out,
                "       {} {} ({})",
                status_mark(outcome),
                module.title,
                outcome.label()
            )?;
        }
    }

    if session.all_answered() {
        let summary = session.summary();
        writeln!(out, "\nCongratulations! You've completed all modules!")?;
        writeln!(
            out,
            "Final Score: {}/{} ({}%)",
            summary.correct_answers, summary.total_questions, summary.percentage
        )?;
        writeln!(out, "  r) View Results")?;
        writeln!(out, "  s) Start Over")?;
    }
    writeln!(out, "  q) Quit")?;
    Ok(())
}

fn prompt_home<R: BufRead, W: Write>(
    session: &Session,
    input: &mut R,
    out: &mut W,
) -> Result<HomeChoice> {
    render_home(session, out)?;
    let sections = session.catalog().sections();
    let complete = session.all_answered();
    let choices = if complete {
        format!("1-{}, r, s, q", sections.len())
    } else {
        format!("1-{}, q", sections.len())
    };

    loop {
        let Some(line) = read_answer(input, out, &format!("Choose a section [{choices}]: "))? else {
            return Ok(HomeChoice::Quit);
        };
        match line.to_ascii_lowercase().as_str() {
            "q" | "quit" => return Ok(HomeChoice::Quit),
            "r" if complete => return Ok(HomeChoice::Results),
            "s" if complete => return Ok(HomeChoice::StartOver),
            "r" | "s" => writeln!(out, "Answer every module to unlock results.")?,
            other => match other.parse::<usize>() {
                Ok(n) if (1..=sections.len()).contains(&n) => {
                    return Ok(HomeChoice::Section(sections[n - 1].id));
                }
                _ => writeln!(out, "Please choose one of: {choices}.")?,
            },
        }
    }
}

fn play_module<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    out: &mut W,
    show_theory: bool,
) -> Result<ModuleStep> {
    let Some(runner) = session.runner() else {
        return Ok(ModuleStep::Home);
    };
    render_module(runner, out, show_theory)?;
    let section = runner.section_id();
    let option_count = runner.current_module().options.len();
    let prompt = format!("Your answer [1-{option_count}, h for home, q to quit]: ");

    let choice = loop {
        let Some(line) = read_answer(input, out, &prompt)? else {
            return Ok(ModuleStep::Quit);
        };
        match line.to_ascii_lowercase().as_str() {
            "q" | "quit" => return Ok(ModuleStep::Quit),
            "h" | "home" => return Ok(ModuleStep::Home),
            other => match other.parse::<usize>() {
                Ok(n) if (1..=option_count).contains(&n) => break n - 1,
                _ => writeln!(out, "Please enter a number between 1 and {option_count}.")?,
            },
        }
    };

    session.select_option(choice)?;
    let feedback = session.submit_answer()?;
    if let Some(runner) = session.runner() {
        render_feedback(runner, &feedback, out)?;
    }
    if session.advance()? == Advance::SectionComplete {
        writeln!(out, "\n{section} complete!")?;
    }
    Ok(ModuleStep::Answered)
}

fn render_module<W: Write>(runner: &ModuleRunner, out: &mut W, show_theory: bool) -> Result<()> {
    let module = runner.current_module();
    let badges: Vec<&str> = runner
        .progress_badges()
        .into_iter()
        .map(|b| match b {
            Badge::Done => "✓",
            Badge::Current => "●",
            Badge::Upcoming => "○",
        })
        .collect();

    writeln!(out)?;
    writeln!(
        out,
        "[{} {}/{}] {}",
        runner.section_id(),
        runner.position(),
        runner.len(),
        badges.join(" ")
    )?;
    writeln!(out, "== {} ==", module.title)?;
    if !module.description.is_empty() {
        writeln!(out, "{}", module.description)?;
    }
    if show_theory && !module.theory.is_empty() {
        writeln!(out, "\n{}", module.theory)?;
    }
    if !module.media_ref.is_empty() {
        writeln!(out, "Media: {}", module.media_ref)?;
    }
    writeln!(out, "\nKnowledge Check: {}", module.question)?;
    for (i, option) in module.options.iter().enumerate() {
        writeln!(out, "  {}) {}", i + 1, option)?;
    }
    Ok(())
}

fn render_feedback<W: Write>(runner: &ModuleRunner, feedback: &Feedback, out: &mut W) -> Result<()> {
    let module = runner.current_module();
    for (i, (option, mark)) in module
        .options
        .iter()
        .zip(runner.option_marks())
        .enumerate()
    {
        let marker = match mark {
            OptionMark::Correct => "✓",
            OptionMark::WrongChoice => "✗",
            OptionMark::None => " ",
        };
        writeln!(out, "  {marker} {}) {}", i + 1, option)?;
    }
    writeln!(out, "{}", feedback.message)?;
    Ok(())
}

fn render_summary<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    print_summary(session.catalog().name(), &session.summary(), out)
}

fn prompt_summary<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<SummaryChoice> {
    writeln!(out, "\n  h) Review Modules")?;
    writeln!(out, "  s) Start Over")?;
    writeln!(out, "  q) Finish")?;
    loop {
        let Some(line) = read_answer(input, out, "Choose [h, s, q]: ")? else {
            return Ok(SummaryChoice::Finish);
        };
        match line.to_ascii_lowercase().as_str() {
            "h" | "home" => return Ok(SummaryChoice::Review),
            "s" => return Ok(SummaryChoice::StartOver),
            "q" | "quit" => return Ok(SummaryChoice::Finish),
            _ => writeln!(out, "Please choose one of: h, s, q.")?,
        }
    }
}

/// Print `prompt` and read one trimmed line. `None` at end of input.
fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn save_reports(report: &SessionReport, output: &Path, format: ReportFormat) -> Result<()> {
    if format == ReportFormat::None {
        return Ok(());
    }
    std::fs::create_dir_all(output)
        .with_context(|| format!("failed to create output dir: {}", output.display()))?;
    tracing::debug!("writing {:?} report to {}", format, output.display());
    let id = report.id.simple().to_string();
    let stem = format!(
        "session-{}-{}",
        report.created_at.format("%Y-%m-%dT%H%M%S"),
        &id[..8]
    );

    if format.writes_json() {
        let path = output.join(format!("{stem}.json"));
        report.save_json(&path)?;
        eprintln!("Results saved to: {}", path.display());
    }
    if format.writes_html() {
        let path = output.join(format!("{stem}.html"));
        write_html_report(report, &path)?;
        eprintln!("HTML report: {}", path.display());
    }
    Ok(())
}
