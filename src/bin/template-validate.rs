use std::env;
use std::fs;
use std::process;
use template_reconciler::{
    merge_template, validate_document, TemplateCreateRequest, TemplateError, TemplateResult,
    ValidationIssue, ValidationReport,
};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: template-validate <file.html|file.json>");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  template-validate newsletter.html");
        eprintln!("  template-validate payload.json");
        process::exit(1);
    }

    let mut exit_code = 0;

    for file_path in &args[1..] {
        match validate_file(file_path) {
            Ok(report) if report.is_valid => {
                println!("✓ {} is valid", file_path);
                print_issues("warning", &report.warnings);
            }
            Ok(report) => {
                eprintln!("✗ {} is invalid:", file_path);
                print_issues("error", &report.errors);
                print_issues("warning", &report.warnings);
                exit_code = 1;
            }
            Err(e) => {
                eprintln!("✗ {}: {}", file_path, e);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

fn validate_file(path: &str) -> TemplateResult<ValidationReport> {
    let content = fs::read_to_string(path)
        .map_err(|e| TemplateError::ReadError(format!("failed to read file: {}", e)))?;

    // JSON files carry a template payload (nom/sujet/html_content/css_content);
    // the stored fields are merged before validating. Anything else is
    // validated directly as a document.
    let document = if path.ends_with(".json") {
        let payload: TemplateCreateRequest = serde_json::from_str(&content)?;
        merge_template(
            &payload.html_content,
            payload.css_content.as_deref().unwrap_or(""),
        )
    } else {
        content
    };

    Ok(validate_document(&document))
}

fn print_issues(label: &str, issues: &[ValidationIssue]) {
    for issue in issues {
        eprintln!("  {}: {}", label, issue.message);
    }
}
