use std::collections::HashMap;

use colored::{Color, ColoredString, Colorize};
use crossterm::terminal;
use judge_webclient::Testcase;

use crate::testing::{BatchResult, CaseVerdict, VerdictKind};

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }
}

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

impl ColorTheme for VerdictKind {
    fn color(&self) -> Color {
        use VerdictKind::*;
        if !self::is_truecolor_supported() {
            return match self {
                Accepted => Color::Green,
                WrongAnswer => Color::Yellow,
                TimeLimitExceeded | MemoryLimitExceeded => Color::Red,
                RuntimeError | CompileError => Color::Magenta,
                TransportError | Unknown => Color::BrightBlack,
            };
        }

        let (r, g, b) = match self {
            Accepted => (30, 180, 40),
            WrongAnswer => (210, 138, 4),
            TimeLimitExceeded | MemoryLimitExceeded => (220, 42, 42),
            RuntimeError => (171, 40, 200),
            CompileError => (90, 90, 220),
            TransportError | Unknown => (110, 110, 110),
        };
        Color::TrueColor { r, g, b }
    }
}

pub fn verdict_icon(kind: VerdictKind) -> ColoredString {
    let fg = if is_truecolor_supported() {
        Color::TrueColor {
            r: 255,
            g: 255,
            b: 255,
        }
    } else {
        Color::BrightWhite
    };
    format!(" {:<3} ", kind.abbr())
        .on_color(kind.color())
        .bold()
        .color(fg)
}

pub fn print_batch_summary(result: &BatchResult) {
    let bar = "-".repeat(5);
    print!("{} ", bar);

    let count: HashMap<VerdictKind, usize> =
        result
            .case_results
            .iter()
            .fold(HashMap::new(), |mut count, v| {
                *count.entry(v.verdict).or_default() += 1;
                count
            });

    let num_total = result.case_results.len();
    let num_failed = num_total - result.num_passed();

    if result.all_passed {
        print!("{}", format!("{} ({})", result.message, num_total).green());
    } else {
        let mut detail: Vec<_> = count
            .iter()
            .filter(|(&kind, _)| kind != VerdictKind::Accepted)
            .collect();
        detail.sort_by_key(|(&kind, _)| kind.abbr());
        let detail_msg = detail
            .into_iter()
            .map(|(&kind, &cnt)| {
                format!(
                    "{}{}{}",
                    self::verdict_icon(kind),
                    "x".dimmed(),
                    cnt.to_string().bold().bright_white(),
                )
            })
            .collect::<Vec<String>>()
            .join(", ");

        print!(
            "{} ({}/{}) ({})",
            result.message.bright_red(),
            num_failed,
            num_total,
            detail_msg
        );
    }

    println!(" {}", bar);
}

pub fn print_case_detail(name: &str, testcase: &Testcase, v: &CaseVerdict) {
    let (cols, _) = terminal::size().unwrap_or((40, 40));
    let cols = cols.max(20) as usize;

    const BOLD_LINE: &str = "━";
    const THIN_LINE: &str = "─";

    let bold_bar = BOLD_LINE.repeat(cols).blue().bold();

    println!(
        "\n{}: {} {} [{}, {}]\n{}",
        name.color(Color::BrightYellow).bold(),
        self::verdict_icon(v.verdict),
        v.message,
        v.elapsed,
        v.memory,
        bold_bar,
    );

    fn print_sub_title(s: &str, cols: usize) {
        println!(
            "{}{}",
            s.cyan().bold(),
            THIN_LINE.repeat(cols.saturating_sub(s.len() + 1)).bright_black(),
        )
    }

    fn print_lines(entire_str: &str) {
        let lines: Vec<_> = entire_str.lines().collect();
        if lines.is_empty() {
            println!("{}", "<EMPTY>".magenta().dimmed());
            return;
        }
        for line in lines {
            let trimmed = line.trim_end();
            print!("{}", trimmed);

            let num_trailling_whitespace = line.len() - trimmed.len();
            if num_trailling_whitespace > 0 {
                print!("{}", " ".repeat(num_trailling_whitespace).on_red());
            }
            println!();
        }
    }

    print_sub_title("[input]", cols);
    print_lines(&testcase.input);

    print_sub_title("[expected]", cols);
    print_lines(&testcase.expected_output);

    let output_title = if v.verdict == VerdictKind::CompileError {
        "[compiler]"
    } else {
        "[output]"
    };
    print_sub_title(output_title, cols);
    print_lines(&v.output);

    println!("{}", bold_bar);
}
