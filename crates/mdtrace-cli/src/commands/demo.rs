//! Salary walkthrough: a small algorithm narrated into a markdown report.
//!
//! Exercises every gate: a condition scoped to one loop iteration, a
//! ticket-bracketed region inside a muted stretch, and a plain mute around
//! a branch that should not appear.

use crate::support::fail;
use mdtrace_report::{Console, FileReporter, ReportConfig, ReportError, Reporter, Sink};
use serde::Serialize;
use std::path::PathBuf;

pub const DEFAULT_OUT: &str = "mdtrace-demo.md";

pub struct Args {
    pub out: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
}

#[derive(Debug, Clone, Serialize)]
struct Person {
    name: &'static str,
    age: u32,
}

#[derive(Debug, Clone, Serialize)]
struct SalaryBand {
    age: u32,
    amount: u64,
}

#[derive(Debug, Clone, Serialize)]
struct PaidPerson {
    name: &'static str,
    age: u32,
    salary: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DemoSummary {
    report_path: String,
    people: usize,
    total_salaries: u64,
    bytes_written: u64,
}

pub fn run(args: Args) {
    let mut config = match &args.config {
        Some(path) => ReportConfig::load(path).unwrap_or_else(|e| fail(e)),
        None => ReportConfig::new(DEFAULT_OUT),
    };
    if let Some(out) = args.out {
        config.output = out;
    }
    if args.json {
        config.console = false;
    }

    let mut reporter = FileReporter::from_config(&config).unwrap_or_else(|e| fail(e));
    let total = narrate(&mut reporter).unwrap_or_else(|e| fail(e));

    let report_path = reporter.sink().path().to_path_buf();
    let bytes_written = std::fs::metadata(&report_path)
        .map(|meta| meta.len())
        .unwrap_or_else(|e| fail(format!("{}: {e}", report_path.display())));
    let summary = DemoSummary {
        report_path: report_path.display().to_string(),
        people: people().len(),
        total_salaries: total,
        bytes_written,
    };
    tracing::debug!(?summary, "demo finished");

    if args.json {
        let rendered = serde_json::to_string_pretty(&summary)
            .unwrap_or_else(|e| fail(format!("failed to render summary: {e}")));
        println!("{rendered}");
    } else {
        println!("mdtrace demo");
        println!("  Report: {}", summary.report_path);
        println!("  People: {}", summary.people);
        println!("  Total salaries: {}", summary.total_salaries);
        println!("  Bytes written: {}", summary.bytes_written);
    }
}

fn people() -> Vec<Person> {
    vec![
        Person {
            name: "John",
            age: 25,
        },
        Person {
            name: "Jane",
            age: 22,
        },
        Person {
            name: "Jack",
            age: 27,
        },
    ]
}

fn salary_bands() -> Vec<SalaryBand> {
    vec![
        SalaryBand {
            age: 20,
            amount: 25_000,
        },
        SalaryBand {
            age: 24,
            amount: 36_000,
        },
        SalaryBand {
            age: 26,
            amount: 42_000,
        },
    ]
}

fn assign_salaries(people: &[Person], bands: &[SalaryBand]) -> Vec<PaidPerson> {
    people
        .iter()
        .map(|person| {
            let salary = bands
                .iter()
                .filter(|band| person.age >= band.age)
                .map(|band| band.amount)
                .last()
                .unwrap_or(0);
            PaidPerson {
                name: person.name,
                age: person.age,
                salary,
            }
        })
        .collect()
}

/// Write the walkthrough and return the computed total.
fn narrate<S: Sink, C: Console>(rep: &mut Reporter<S, C>) -> Result<u64, ReportError> {
    let people = people();
    let bands = salary_bands();

    rep.h1(["Example 1: Salary Report"])?;
    rep.text(["We have three people:"])?;
    rep.json(&people)?;
    rep.text(["And a table with the salary each person earns once they reach a given age:"])?;
    rep.json(&bands)?;

    let paid = assign_salaries(&people, &bands);
    rep.text(["We look up each person in the salary table:"])?;
    rep.code(
        "let salary = bands\n    .iter()\n    .filter(|band| person.age >= band.age)\n    .map(|band| band.amount)\n    .last()\n    .unwrap_or(0);",
        Some("rust"),
        Some("highest band the person has reached"),
    )?;
    rep.json(&paid)?;

    rep.h2(["Total Salaries:"])?;
    rep.text([
        "We sum every salary with a ::fold::.",
        "Only Jane's iteration is narrated:",
    ])?;

    rep.gate_mut().set_condition("name", "Jane");
    let mut total = 0;
    for person in &paid {
        rep.gate_mut().set_value("name", person.name);
        rep.text(["During the iteration we add the person's salary to the accumulator:"])?;
        rep.json(&serde_json::json!({
            "accumulator": total,
            "personSalary": person.salary,
            "nextValue": format!("{total} + {} = {}", person.salary, total + person.salary),
        }))?;
        rep.log(format_args!(
            "when the name is {} the accumulator is {total}",
            person.name
        ));
        total += person.salary;
    }
    rep.gate_mut().clear_conditions();
    rep.gate_mut().clear_values();

    rep.text(["And we get the total salaries:"])?;
    rep.json(&total)?;

    // Muted stretch; the ticket forces one labelled snapshot through.
    rep.gate_mut().mute();
    rep.text(["This paragraph is muted."])?;
    rep.gate_mut().add_ticket("top-earner");
    rep.gate_mut().use_ticket("top-earner");
    if let Some(top) = paid.iter().max_by_key(|person| person.salary) {
        rep.labeled_json("Top earner:", top)?;
    }
    rep.gate_mut().finish_ticket("top-earner");
    rep.gate_mut().unmute();

    if total < 1_000_000 {
        rep.gate_mut().mute();
    }
    rep.h1(["We are millionaires!"])?;
    rep.gate_mut().unmute();
    rep.h1(["We are not millionaires :("])?;

    Ok(total)
}
