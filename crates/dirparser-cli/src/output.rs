//! Human-readable rendering of progress events and reports

use dirparser_core::{
	CountCheck, CreateReport, ExtraScan, Finding, ParsedListing, ReconcileEvent, ReportStatus,
	VerifyPhase, VerifyReport,
};

pub fn print_event(event: &ReconcileEvent) {
	match event {
		ReconcileEvent::DirectoryCreated(path) => println!("  Created: {}", path.display()),
		ReconcileEvent::DirectoryExists(path) => println!("  Exists:  {}", path.display()),
		ReconcileEvent::PhaseStarted(phase) => {
			let title = match phase {
				VerifyPhase::Directories => "Checking Directories",
				VerifyPhase::Files => "Checking Files",
				VerifyPhase::ExtraEntries => "Checking for Extra Files",
			};
			if *phase != VerifyPhase::Directories {
				println!();
			}
			println!("=== {} ===", title);
		}
		ReconcileEvent::Finding(finding) => println!("  {}", describe_finding(finding)),
		ReconcileEvent::ScanningRoots(roots) => {
			println!("  Scanning within:");
			for root in roots {
				println!("    {}", root.display());
			}
		}
		ReconcileEvent::ExtraScanSkipped => {
			println!("  No root directories found in listing, skipping extra files check");
		}
	}
}

pub fn describe_finding(finding: &Finding) -> String {
	match finding {
		Finding::MissingDirectory(path) => format!("✗ MISSING DIR:  {}", path.display()),
		Finding::NotADirectory(path) => format!("✗ NOT A DIR:    {} (exists as file)", path.display()),
		Finding::MissingFile(path) => format!("✗ MISSING FILE: {}", path.display()),
		Finding::NotAFile(path) => format!("✗ NOT A FILE:   {} (exists as directory)", path.display()),
		Finding::SizeMismatch { path, expected, actual } => format!(
			"⚠ SIZE MISMATCH: {} (expected {} bytes, got {} bytes)",
			path.display(),
			expected,
			actual
		),
		Finding::ExtraFile(path) => format!("⚠ EXTRA FILE: {}", path.display()),
		Finding::ExtraDirectory(path) => format!("⚠ EXTRA DIR:  {}", path.display()),
	}
}

pub fn print_create_summary(report: &CreateReport) {
	println!();
	println!(
		"Summary: {} created, {} already existed",
		report.created, report.skipped
	);

	match report.count_check {
		CountCheck::Verified { processed } => println!(
			"✓ Verification successful: Processed {} directories (matches expected count)",
			processed
		),
		CountCheck::Mismatch { processed, expected } => println!(
			"✗ Verification failed: Processed {} directories, but expected {}",
			processed, expected
		),
		CountCheck::Unavailable { .. } => {
			println!("Warning: Could not find a directory total in the listing for verification")
		}
	}
}

fn file_issues(report: &VerifyReport) -> String {
	let mut issues = Vec::new();
	if report.files_missing > 0 {
		issues.push(format!("{} missing", report.files_missing));
	}
	if report.size_mismatches > 0 {
		issues.push(format!("{} wrong size", report.size_mismatches));
	}
	issues.join(", ")
}

pub fn print_verify_summary(report: &VerifyReport, listing: &ParsedListing) {
	if let ExtraScan::Completed { .. } = report.extra_scan {
		if report.extra_items() == 0 {
			println!("  No extra files or directories found");
		} else {
			println!(
				"  Found {} extra files, {} extra directories",
				report.extra_files, report.extra_directories
			);
		}
	}

	println!();
	println!("=== Summary ===");
	println!("  Listing encoding: {}", listing.encoding);
	if report.directories_missing == 0 {
		println!("  Directories: {}/{} ✓", report.directories_ok, report.listed_directories);
	} else {
		println!(
			"  Directories: {}/{} ({} missing)",
			report.directories_ok, report.listed_directories, report.directories_missing
		);
	}
	if report.files_missing == 0 && report.size_mismatches == 0 {
		println!("  Files:       {}/{} ✓", report.files_ok, report.listed_files);
	} else {
		println!(
			"  Files:       {}/{} ({})",
			report.files_ok,
			report.listed_files,
			file_issues(report)
		);
	}
	if report.extra_items() > 0 {
		println!(
			"  Extra items: {} files, {} directories",
			report.extra_files, report.extra_directories
		);
	}

	println!();
	for discrepancy in &report.count_discrepancies {
		println!(
			"⚠ Warning: Parsed {} {} from listing, but file claims {}",
			discrepancy.parsed, discrepancy.kind, discrepancy.declared
		);
	}

	match report.status() {
		ReportStatus::Error => println!("✗ Verification completed with errors"),
		ReportStatus::Warning => println!("⚠ Verification completed with warnings"),
		ReportStatus::Success => {
			println!("✓ Verification successful - all files and directories match")
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	#[test]
	fn test_describe_size_mismatch() {
		let finding = Finding::SizeMismatch {
			path: PathBuf::from("doc.txt"),
			expected: 120,
			actual: 7,
		};
		assert_eq!(
			describe_finding(&finding),
			"⚠ SIZE MISMATCH: doc.txt (expected 120 bytes, got 7 bytes)"
		);
	}
}
