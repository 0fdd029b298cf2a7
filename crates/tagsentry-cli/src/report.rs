use tagsentry_core::ledger::FindingLedger;
use tagsentry_core::status::Status;

/// Print the plugin output the monitoring supervisor reads from stdout:
/// the finding lines (critical first, then warning, then unknown), then
/// the performance-data line.
///
/// In the OK state the report collapses to the single line `State is OK`;
/// per-resource OK detail is verbose-only and meant for humans, not for
/// supervisor configurations.
pub fn print_report(ledger: &FindingLedger, verbose: bool) {
    if ledger.status() == Status::Ok {
        if verbose {
            for (_, message) in ledger.report(true) {
                println!("{message}");
            }
        }
        println!("State is OK");
    } else {
        for (_, message) in ledger.report(verbose) {
            println!("{message}");
        }
    }
    println!("{}", ledger.perf_data());
}
