use colored::{Color, ColoredString, Colorize};
use crossterm::terminal;

use crate::checker::{CheckResult, JudgeCode};
use crate::problem::Problem;
use crate::sandbox::ExecutionResult;
use crate::stats::Stats;

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }
}

const BOLD_LINE: &str = "━";
const THIN_LINE: &str = "─";

pub fn is_truecolor_supported() -> bool {
    let Ok(v) = std::env::var("COLORTERM") else {
        return false
    };
    matches!(v.as_str(), "truecolor" | "24bit")
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for log::Level {
    fn color(&self) -> Color {
        use log::Level::*;
        match self {
            Error => Color::BrightRed,
            Warn => Color::BrightYellow,
            Info => Color::Cyan,
            Debug => Color::Magenta,
            Trace => Color::Blue,
        }
    }
}

impl ColorTheme for JudgeCode {
    fn color(&self) -> Color {
        use JudgeCode::*;
        if !self::is_truecolor_supported() {
            return match self {
                OK | AC => Color::Green,
                WA => Color::Yellow,
                TLE => Color::Red,
                RE => Color::Magenta,
            };
        }

        match self {
            OK | AC => Color::TrueColor {
                r: 30,
                g: 180,
                b: 40,
            },
            WA => Color::TrueColor {
                r: 210,
                g: 138,
                b: 4,
            },
            TLE => Color::TrueColor {
                r: 220,
                g: 42,
                b: 42,
            },
            RE => Color::TrueColor {
                r: 171,
                g: 40,
                b: 200,
            },
        }
    }
}

pub fn judge_icon(judge: JudgeCode) -> ColoredString {
    let fg = if is_truecolor_supported() {
        Color::TrueColor {
            r: 255,
            g: 255,
            b: 255,
        }
    } else {
        Color::BrightBlack
    };
    format!(" {} ", judge)
        .on_color(judge.color())
        .bold()
        .color(fg)
}

fn terminal_cols() -> usize {
    let (cols, _) = terminal::size().unwrap_or((40, 40));
    cols as usize
}

fn print_sub_title(s: &str, cols: usize) {
    println!(
        "{}{}",
        s.cyan().bold(),
        THIN_LINE
            .repeat(cols.saturating_sub(s.chars().count() + 1))
            .bright_black(),
    )
}

/// Prints `text` line by line, marking trailing whitespace and a missing final newline.
fn print_lines(text: &str) {
    let lines: Vec<_> = text.lines().collect();
    if lines.is_empty() {
        println!("{}", "<EMPTY>".magenta().dimmed());
        return;
    }
    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim_end();
        print!("{}", trimmed);

        let num_trailing_whitespace = line.len() - trimmed.len();
        if num_trailing_whitespace > 0 {
            print!(
                "{}{}",
                " ".repeat(num_trailing_whitespace).on_red(),
                "(Trailing whitespace)".bright_red().bold()
            );
        }

        let is_last_line = i + 1 == lines.len();
        if is_last_line && !text.ends_with('\n') {
            print!("{}", " Missing new line ".on_yellow().black().bold());
        }

        println!();
    }
}

pub fn print_execution_result(res: &ExecutionResult) {
    let cols = terminal_cols();
    let bold_bar = BOLD_LINE.repeat(cols).blue().bold();

    println!(
        "{} [{}ms]\n{}",
        judge_icon(JudgeCode::of_execution(res)),
        res.elapsed().as_millis(),
        bold_bar,
    );

    print_sub_title("[stdout]", cols);
    print_lines(&res.output);

    if let Some(error) = &res.error {
        print_sub_title("[error]", cols);
        println!("{}", error.bright_red());
    }

    println!("{}", bold_bar);
}

pub fn print_check_result(problem: &Problem, judge: JudgeCode, res: &CheckResult) {
    let cols = terminal_cols();
    let bold_bar = BOLD_LINE.repeat(cols).blue().bold();

    println!(
        "\n{}: {}\n{}",
        problem.id.color(Color::BrightYellow).bold(),
        judge_icon(judge),
        bold_bar,
    );

    let message = if res.is_correct {
        res.message.green().bold()
    } else {
        res.message.bright_red().bold()
    };
    println!("{}", message);

    if !res.is_correct {
        if let Some(expected) = &res.expected_output {
            print_sub_title("[expected]", cols);
            print_lines(expected);
        }
        print_sub_title("[your output]", cols);
        print_lines(&res.user_output);
    }

    if let Some(details) = &res.details {
        print_sub_title("[details]", cols);
        println!("{}", details);
    }

    println!("{}", bold_bar);
}

pub fn print_problem_list<'a>(
    problems: impl IntoIterator<Item = &'a Problem>,
    is_completed: impl Fn(&str) -> bool,
) {
    for p in problems {
        let mark = if is_completed(&p.id) {
            "✔".green().bold()
        } else {
            "·".dimmed()
        };
        println!(
            "{} {:<16} {:<14} {:<20} {}",
            mark,
            p.id.bright_white(),
            p.difficulty.to_string().cyan(),
            p.category.dimmed(),
            p.title,
        );
    }
}

pub fn print_problem(problem: &Problem, hints_revealed: usize, completed: bool) {
    let cols = terminal_cols();
    let bold_bar = BOLD_LINE.repeat(cols).blue().bold();

    let status = if completed {
        " (completed)".green().to_string()
    } else {
        String::new()
    };
    println!(
        "{} {}{}\n{} / {}\n{}",
        problem.id.color(Color::BrightYellow).bold(),
        problem.title.bold(),
        status,
        problem.category,
        problem.difficulty.to_string().cyan(),
        bold_bar,
    );
    println!("{}", problem.description);

    if let Some(starter) = &problem.starter_code {
        print_sub_title("[starter code]", cols);
        print!("{}", starter);
        if !starter.ends_with('\n') {
            println!();
        }
    }

    if let Some(expected) = problem.expected_output() {
        print_sub_title("[expected output]", cols);
        print_lines(expected);
    }

    let shown = hints_revealed.min(problem.hints.len());
    if shown > 0 {
        print_sub_title("[hints]", cols);
        for (i, hint) in problem.hints[..shown].iter().enumerate() {
            println!("{}. {}", i + 1, hint);
        }
    }
    if shown < problem.hints.len() {
        println!(
            "{}",
            format!("{} more hint(s) available", problem.hints.len() - shown).dimmed()
        );
    }

    println!("{}", bold_bar);
}

pub fn print_solution(problem: &Problem) {
    let cols = terminal_cols();
    print_sub_title("[solution]", cols);
    match &problem.solution {
        Some(solution) if !solution.trim().is_empty() => {
            print!("{}", solution);
            if !solution.ends_with('\n') {
                println!();
            }
            println!(
                "{}",
                "Try to solve it yourself before looking at the solution!".dimmed()
            );
        }
        _ => println!("{}", "No solution available.".dimmed()),
    }
    println!("{}", BOLD_LINE.repeat(cols).blue().bold());
}

pub fn print_stats(stats: &Stats) {
    let bar = "-".repeat(5);
    println!(
        "{} {}/{} problems, {}/{} points {}",
        bar,
        stats.completed_problems.to_string().bold(),
        stats.total_problems,
        stats.earned_points.to_string().bold(),
        stats.total_points,
        bar,
    );

    print_sub_title("[difficulty]", terminal_cols());
    for d in &stats.difficulty_stats {
        println!(
            "{:<14} {}/{}",
            d.difficulty.to_string().cyan(),
            d.tally.completed,
            d.tally.total
        );
    }

    print_sub_title("[category]", terminal_cols());
    for c in &stats.category_stats {
        println!("{:<20} {}/{}", c.category, c.tally.completed, c.tally.total);
    }
}
