use std::io;
use std::io::prelude::*;

use tracing::{span, Level};
use tracing_subscriber::prelude::*;

use sevseg_decoder::deduce::solve;
use sevseg_decoder::entry::Entry;
use sevseg_decoder::output::{count_unambiguous, output_value};

fn part1(entries: &[Entry]) {
    let total: usize = entries
        .iter()
        .map(|entry| count_unambiguous(entry.output()))
        .sum();
    println!("unambiguous output digits: {}", total);
}

fn part2(entries: &[Entry]) {
    let mut total: u32 = 0;
    for (i, entry) in entries.iter().enumerate() {
        let span = span!(Level::DEBUG, "entry", number = i + 1);
        let _enter = span.enter();
        let solution = match solve(entry.observed()) {
            Ok(solution) => solution,
            Err(e) => {
                panic!("entry {}: {}", i + 1, e);
            }
        };
        match output_value(&solution, entry.output()) {
            Ok(value) => {
                total += value;
            }
            Err(e) => {
                panic!("entry {}: {}", i + 1, e);
            }
        }
    }
    println!("decoded output total: {}", total);
}

fn main() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let mut entries: Vec<Entry> = Vec::new();
    for (i, line) in io::BufReader::new(io::stdin()).lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                panic!("failed to read input: {}", e);
            }
        };
        match Entry::try_from(line.as_str()) {
            Ok(entry) => {
                entries.push(entry);
            }
            Err(e) => {
                panic!("line {}: {}", i + 1, e);
            }
        }
    }
    part1(&entries);
    part2(&entries);
}
