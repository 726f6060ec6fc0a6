use std::env;
use std::process;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use tender_core::catalog::Catalog;
use tender_core::pricing::format_inr;
use tender_pipeline::catalog_loader::load_catalog_file;
use tender_pipeline::quote::QuotePipeline;
use tender_pipeline::types::{QuoteDigest, RfpInput};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct QuoteJson<'a> {
    pipeline_ms: u128,
    #[serde(flatten)]
    digest: &'a QuoteDigest,
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

fn print_human(digest: &QuoteDigest, load_ms: u128, pipeline_ms: u128) {
    println!();
    println!("  \u{2554}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2557}");
    println!("  \u{2551}           RFP AUTOMATION \u{2014} Tender Quotation Digest           \u{2551}");
    println!("  \u{255a}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{255d}");
    println!();

    println!("  {}", digest.rfp_title);
    println!(
        "  {} specifications extracted  \u{00b7}  {} products matched  \u{00b7}  {} quotes priced",
        digest.extraction.observations().len(),
        digest.matching.matches().len(),
        digest.pricing.len()
    );
    if digest.validation.is_valid {
        println!(
            "  Specification complete  \u{00b7}  Priced for {} meters",
            digest.quantity_meters
        );
    } else {
        println!(
            "  Missing: {}  \u{00b7}  Priced for {} meters",
            digest.validation.missing_fields.join(", "),
            digest.quantity_meters
        );
    }
    for warning in &digest.validation.warnings {
        println!("  Note: {}", warning);
    }
    println!();

    if digest.pricing.is_empty() {
        println!("  No products matched this specification. Nothing to quote.");
    } else {
        println!("  {:\u{2500}<64}", "");
        let quotes = digest.matching.matches().iter().zip(&digest.pricing);
        for (i, (candidate, quote)) in quotes.enumerate() {
            let marker = if digest.recommended_sku.as_deref() == Some(quote.sku.as_str()) {
                ">>"
            } else {
                "  "
            };

            println!(
                "  {} {}. {:16} {:>10}  match {:.0}%",
                marker,
                i + 1,
                quote.sku,
                format_inr(quote.total),
                candidate.match_score * 100.0,
            );
            println!("        {}", quote.product_name);
            println!(
                "        unit {} x {} m  \u{00b7}  testing {}  \u{00b7}  delivery {}  \u{00b7}  urgency {}",
                format_inr(quote.unit_price),
                quote.quantity,
                format_inr(quote.testing_cost),
                format_inr(quote.delivery_cost),
                format_inr(quote.urgency_adjustment),
            );

            let attr_display = if candidate.matched_attributes.len() <= 4 {
                candidate.matched_attributes.join(", ")
            } else {
                format!(
                    "{}, +{} more",
                    candidate.matched_attributes[..3].join(", "),
                    candidate.matched_attributes.len() - 3
                )
            };
            if !attr_display.is_empty() {
                println!("        matched on: {}", attr_display);
            }
            println!();
        }
        println!("  {:\u{2500}<64}", "");
    }

    println!();
    match digest.recommended_sku {
        Some(ref sku) => println!(
            "  Recommended: {}  \u{00b7}  estimated {}",
            sku,
            format_inr(digest.total_estimate)
        ),
        None => println!("  No recommendation for this tender."),
    }
    if let Some(ref summary) = digest.pricing_summary {
        println!(
            "  Range {} to {}  \u{00b7}  average {}  \u{00b7}  {} options",
            summary.lowest.formatted,
            summary.highest.formatted,
            summary.average.formatted,
            summary.options_count
        );
    }
    println!();
    println!(
        "  \u{23f1}  Catalog ready in {}ms \u{00b7} Quote built in {}ms \u{00b7} Total {}ms",
        load_ms,
        pipeline_ms,
        load_ms + pipeline_ms
    );
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn print_usage() {
    eprintln!(
        "Usage: tender-server --scope <text> [--title <text>] [--deadline <rfc3339>] \
         [--quantity N] [--testing a,b,c] [--catalog file.csv] [--json]"
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scope     Tender scope text to quote (required)");
    eprintln!("  --title     RFP title, also scanned for specifications");
    eprintln!("  --deadline  Submission deadline in RFC 3339, drives urgency pricing");
    eprintln!("  --quantity  Order size in meters, overrides any extracted quantity");
    eprintln!("  --testing   Comma-separated testing requirement lines");
    eprintln!("  --catalog   Product CSV to quote from instead of the built-in catalog");
    eprintln!("  --json      Output as JSON instead of formatted text");
    eprintln!();
    eprintln!("Example:");
    eprintln!(
        "  tender-server --scope \"Supply of 5000 meters of 11kV XLPE cables with \
         3 core aluminum conductor, size 240 sq.mm\""
    );
    eprintln!(
        "  tender-server --scope \"11kV XLPE cable\" --quantity 2500 \
         --deadline 2025-07-01T00:00:00Z --json"
    );
}

fn flag_value(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i + 1) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Error: {} requires a value", flag);
            process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let mut scope_text: Option<String> = None;
    let mut title: Option<String> = None;
    let mut deadline: Option<DateTime<Utc>> = None;
    let mut quantity: Option<f64> = None;
    let mut testing: Vec<String> = Vec::new();
    let mut catalog_path: Option<String> = None;
    let mut json_output = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scope" => {
                scope_text = Some(flag_value(&args, i, "--scope"));
                i += 2;
            }
            "--title" => {
                title = Some(flag_value(&args, i, "--title"));
                i += 2;
            }
            "--deadline" => {
                let raw = flag_value(&args, i, "--deadline");
                match DateTime::parse_from_rfc3339(&raw) {
                    Ok(parsed) => deadline = Some(parsed.with_timezone(&Utc)),
                    Err(e) => {
                        eprintln!(
                            "Error: --deadline must be RFC 3339, e.g. 2025-07-01T00:00:00Z ({})",
                            e
                        );
                        process::exit(1);
                    }
                }
                i += 2;
            }
            "--quantity" => {
                let raw = flag_value(&args, i, "--quantity");
                quantity = Some(raw.parse().unwrap_or_else(|_| {
                    eprintln!("Error: --quantity requires a number of meters");
                    process::exit(1);
                }));
                i += 2;
            }
            "--testing" => {
                testing = flag_value(&args, i, "--testing")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                i += 2;
            }
            "--catalog" => {
                catalog_path = Some(flag_value(&args, i, "--catalog"));
                i += 2;
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
    }

    let scope_text = match scope_text {
        Some(text) => text,
        None => {
            eprintln!("Error: --scope is required");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    // Load the product catalog
    let load_start = Instant::now();
    let catalog = match catalog_path {
        Some(ref path) => match load_catalog_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading catalog: {}", e);
                process::exit(1);
            }
        },
        None => Catalog::builtin(),
    };
    let load_ms = load_start.elapsed().as_millis();

    let input = RfpInput {
        title: title.unwrap_or_else(|| "Untitled RFP".to_owned()),
        scope_text,
        deadline,
        quantity,
        testing_requirements: testing,
    };

    // Build and run the pipeline
    let pipeline_start = Instant::now();
    let pipeline = QuotePipeline::new(catalog);
    let digest = match pipeline.run(&input) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let pipeline_ms = pipeline_start.elapsed().as_millis();

    if json_output {
        let payload = QuoteJson {
            pipeline_ms,
            digest: &digest,
        };
        println!("{}", serde_json::to_string_pretty(&payload).unwrap());
    } else {
        print_human(&digest, load_ms, pipeline_ms);
    }
}
