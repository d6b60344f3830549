//! Terminal rendering of the three screens.
//!
//! Every function returns a `String`; the caller decides where it goes.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use console::style;
use std::fmt::Write as _;

use crate::domain::models::{
    AnalysisResult, Bucket, FlowState, RiskCategory, UserInput, ENERGY_RANGE, MAX_VALUES,
};

const RULE_WIDTH: usize = 64;
const TABLE_WIDTH: u16 = 80;

fn rule() -> String {
    style("─".repeat(RULE_WIDTH)).dim().to_string()
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", style(title.to_uppercase()).cyan().bold());
}

/// Four overlapping circles, with an optional line in the centre.
pub fn venn(center: Option<&str>) -> String {
    let center = center.unwrap_or("IKIGAI");
    let mut out = String::new();
    let _ = writeln!(out, "                 {}", style("What you love").magenta());
    let _ = writeln!(out, "            ┌────────────┬────────────┐");
    let _ = writeln!(out, "            │  Passion   │  Mission   │");
    let _ = writeln!(
        out,
        " {}  ├──────── {} ────────┤  {}",
        style("Good at").green(),
        style("◆").yellow().bold(),
        style("World needs").blue()
    );
    let _ = writeln!(out, "            │ Profession │  Vocation  │");
    let _ = writeln!(out, "            └────────────┴────────────┘");
    let _ = writeln!(out, "               {}", style("What you can be paid for").yellow());
    let _ = write!(out, "\n  {}", style(center).bold());
    out
}

pub fn intro() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style("IKIGAI").bold().underlined());
    let _ = writeln!(out, "A reason for being, at the crossing of four questions.\n");
    let _ = writeln!(
        out,
        "List what you love, what you are good at, what you can be paid for and \
         what the world needs.\nAdd your core values and your constraints, then get \
         a grounded analysis with a viability score and a 90-day plan.\n"
    );
    let _ = writeln!(out, "{}\n", venn(None));
    let _ = write!(
        out,
        "Type {} to begin or {} to leave.",
        style("start").bold(),
        style("quit").bold()
    );
    out
}

fn numbered(out: &mut String, items: &[String]) {
    if items.is_empty() {
        let _ = writeln!(out, "    {}", style("(empty)").dim());
    }
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "    {}. {item}", i + 1);
    }
}

pub fn input_screen(input: &UserInput, error: Option<&str>, loading: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule());
    for bucket in Bucket::ALL {
        let items = input.bucket(bucket);
        let _ = writeln!(
            out,
            "{} {} {}",
            style(bucket.label()).bold(),
            style(format!("[{}]", bucket.key())).dim(),
            style(bucket.hint()).dim().italic()
        );
        numbered(&mut out, items);
    }

    heading(&mut out, "Context");
    let _ = writeln!(
        out,
        "Core values ({}/{MAX_VALUES}):",
        input.values().len()
    );
    numbered(&mut out, input.values());
    let _ = writeln!(out, "Constraints:");
    numbered(&mut out, input.constraints());
    let _ = writeln!(
        out,
        "Energy: {} {}/{}",
        energy_bar(input.energy_level()),
        input.energy_level(),
        ENERGY_RANGE.end()
    );

    if let Some(message) = error {
        let _ = writeln!(out, "\n{} {message}", style("!").red().bold());
        let _ = writeln!(out, "{}", style("(type `dismiss` to hide this message)").dim());
    }
    if loading {
        let _ = writeln!(out, "\n{}", style("Analysis in progress... (`back` abandons it)").yellow());
    }
    let _ = write!(out, "{}", rule());
    out
}

fn energy_bar(level: u8) -> String {
    let max = *ENERGY_RANGE.end();
    format!(
        "{}{}",
        "●".repeat(usize::from(level.min(max))),
        "○".repeat(usize::from(max.saturating_sub(level)))
    )
}

fn score_bar(score: u8) -> String {
    let filled = usize::from(score.min(10));
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

fn score_style(score: u8) -> console::StyledObject<String> {
    let text = format!("{score}/100");
    match score {
        70..=u8::MAX => style(text).green().bold(),
        40..=69 => style(text).yellow().bold(),
        _ => style(text).red().bold(),
    }
}

fn viability_table(result: &AnalysisResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_HORIZONTAL_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("DIMENSION"),
            Cell::new("SCORE").set_alignment(CellAlignment::Right),
            Cell::new(""),
        ]);
    for (label, score) in result.viability.breakdown.entries() {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format!("{score}/10")).set_alignment(CellAlignment::Right),
            Cell::new(score_bar(score)),
        ]);
    }
    table
}

fn intersections_table(result: &AnalysisResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH);
    for (name, text) in [
        ("Passion", &result.passion),
        ("Mission", &result.mission),
        ("Profession", &result.profession),
        ("Vocation", &result.vocation),
    ] {
        table.add_row(vec![Cell::new(name), Cell::new(text)]);
    }
    table
}

fn bullets(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "  • {item}");
    }
}

pub fn result_screen(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "{}", style(&result.ikigai_statement).bold());
    let _ = writeln!(out, "{}", style(format!("“{}”", result.signature_phrase)).italic());

    heading(&mut out, "Key insight");
    let _ = writeln!(out, "{}", result.key_insight);
    heading(&mut out, "Pivot point");
    let _ = writeln!(out, "{}", result.pivot_point);

    heading(&mut out, "Your four circles");
    let _ = writeln!(out, "{}", intersections_table(result));
    let _ = writeln!(out, "\n{}", result.ikigai_description);

    heading(&mut out, "Viability");
    let _ = writeln!(out, "Overall score: {}", score_style(result.viability.score));
    let _ = writeln!(out, "{}", viability_table(result));
    let _ = writeln!(out, "{}", result.viability.reasoning);

    heading(&mut out, "Risks");
    for category in RiskCategory::ALL {
        let mut risks = result.risks_in(category).peekable();
        if risks.peek().is_none() {
            continue;
        }
        let _ = writeln!(out, "{}", style(category).bold());
        for risk in risks {
            let _ = writeln!(out, "  • {}", risk.description);
        }
    }

    if !result.contradictions.is_empty() {
        heading(&mut out, "Contradictions");
        bullets(&mut out, &result.contradictions);
    }

    heading(&mut out, "Minimal version");
    let _ = writeln!(out, "{}", result.minimalist_ikigai);

    heading(&mut out, "Reality tests");
    bullets(&mut out, &result.reality_tests);

    heading(&mut out, "Plan");
    let _ = writeln!(out, "{}", style(&result.timeline_context).dim());
    for (label, phase) in result.timeline.phases() {
        let _ = writeln!(out, "{} {}", style(format!("{label}:")).bold(), phase.objective);
        bullets(&mut out, &phase.actions);
    }

    let _ = write!(out, "{}", rule());
    out
}

/// Commands available on a screen.
pub fn help(state: FlowState) -> String {
    let lines: &[(&str, &str)] = match state {
        FlowState::Intro => &[("start", "begin the assessment"), ("quit", "leave")],
        FlowState::Input => &[
            ("add <bucket> <text>", "add an item (love, good-at, paid, needs)"),
            ("rm <bucket> <n>", "remove item n from a bucket"),
            ("value <text>", "add a core value (at most 3)"),
            ("rm-value <n>", "remove value n"),
            ("constraint <text>", "add a constraint"),
            ("rm-constraint <n>", "remove constraint n"),
            ("energy <1-5>", "set your energy level"),
            ("analyze", "request the analysis"),
            ("dismiss", "hide the current error"),
            ("back", "return to the intro"),
            ("quit", "leave"),
        ],
        FlowState::Result => &[
            ("reset", "edit your answers and analyze again"),
            ("json", "print the analysis as JSON"),
            ("quit", "leave"),
        ],
    };
    let width = lines.iter().map(|(c, _)| c.len()).max().unwrap_or(0);
    lines
        .iter()
        .map(|(cmd, what)| format!("  {cmd:<width$}  {what}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::sample_analysis;

    #[test]
    fn test_input_screen_numbers_items() {
        let mut input = UserInput::new();
        input.add_item(Bucket::Love, "music");
        input.add_item(Bucket::Love, "hiking");
        let screen = input_screen(&input, Some("Please add at least one core value."), false);
        assert!(screen.contains("1. music"));
        assert!(screen.contains("2. hiking"));
        assert!(screen.contains("core value"));
        assert!(screen.contains("3/5"));
    }

    #[test]
    fn test_result_screen_shows_recomputed_score() {
        let screen = result_screen(&sample_analysis());
        assert!(screen.contains("70/100"));
        assert!(screen.contains("Good food, no fuss."));
        assert!(screen.contains("Week 1:"));
        assert!(screen.contains("Strategic"));
    }

    #[test]
    fn test_help_per_state() {
        assert!(help(FlowState::Intro).contains("start"));
        assert!(help(FlowState::Input).contains("rm-constraint"));
        assert!(help(FlowState::Result).contains("reset"));
    }

    #[test]
    fn test_bars() {
        assert_eq!(score_bar(7), "███████░░░");
        assert_eq!(energy_bar(2), "●●○○○");
    }
}
