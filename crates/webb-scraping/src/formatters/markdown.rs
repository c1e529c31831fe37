//! Markdown output formatting.

use crate::error::ScrapeError;
use crate::models::{PlanetProperties, Target};

/// Property keys shown in the planet section, in order.
const SHOWN_PROPERTIES: &[&str] = &["Rp", "Mp", "Rs", "Teq", "Teff", "Jmag", "Kmag"];

/// Format everything known about a target as Markdown.
#[must_use]
pub fn format_target_markdown(target: &Target) -> String {
    let mut output = format!("# {}\n\n", target.input_name);

    // Aliases
    if target.aliases.is_empty() {
        output.push_str("**Aliases**: none found\n\n");
    } else {
        output.push_str(&format!(
            "**Aliases** ({}): {}\n\n",
            target.aliases.len(),
            target.aliases.join(", ")
        ));
    }

    output.push_str(&format!(
        "**JWST approved**: {} | **HST approved**: {}\n\n",
        target.webb_approved, target.hst_approved
    ));

    push_list(&mut output, "JWST observations", &target.webb_proposal_names);
    push_list(&mut output, "JWST programs", &target.webb_proposal_links);

    // HST data products
    if !target.hst_data.is_empty() {
        output.push_str("## HST observations\n\n");
        for (title, url) in &target.hst_data {
            match url {
                Some(url) => output.push_str(&format!("- [{title}]({url})\n")),
                None => output.push_str(&format!("- {title}\n")),
            }
        }
        output.push('\n');
    }

    if let Some(props) = &target.planet_properties {
        output.push_str(&format_properties_markdown(props));
    }

    let mut metrics = Vec::new();
    if let Some(tsm) = target.tsm {
        metrics.push(format!("**TSM**: {tsm:.2}"));
    }
    if let Some(esm) = target.esm {
        metrics.push(format!("**ESM**: {esm:.2}"));
    }
    if !metrics.is_empty() {
        output.push_str(&format!("{}\n\n", metrics.join(" | ")));
    }

    if target.arxiv_links.is_empty() {
        output.push_str("No arXiv links found.\n");
    } else {
        output.push_str(&format!("## arXiv ({})\n\n", target.arxiv_links.len()));
        for link in &target.arxiv_links {
            output.push_str(&format!("- {link}\n"));
        }
    }

    output
}

/// Format the planet property section.
#[must_use]
pub fn format_properties_markdown(props: &PlanetProperties) -> String {
    let mut meta = vec![format!("**Planet**: {}", props.display_name())];
    for key in SHOWN_PROPERTIES {
        if let Some(value) = props.value(key) {
            meta.push(format!("**{key}**: {value}"));
        }
    }
    format!("## Planet properties\n\n{}\n\n", meta.join(" | "))
}

/// Note closing a report whose run stopped early.
#[must_use]
pub fn format_failure_markdown(err: &ScrapeError) -> String {
    match err {
        ScrapeError::Stage { stage, source } => {
            format!("\n**Stopped at stage `{stage}`**: {source}\n")
        }
        other => format!("\n**Stopped early**: {other}\n"),
    }
}

fn push_list(output: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    output.push_str(&format!("## {heading}\n\n"));
    for item in items {
        output.push_str(&format!("- {item}\n"));
    }
    output.push('\n');
}
