// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_message(size: usize) -> String {
    let base = "# Standup\n\n\
        Yesterday I **fixed** the _flaky_ test and ~~broke~~ mended `ci`.\n\n\
        - review PR\n  - nested follow-up\n1. ship it\n1. celebrate\n\n\
        > quoted from @alice\n\n\
        ```rust\nfn main() {}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_selection_text(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("  line number {i} of the selection"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A loose bullet list, so render collapses a blank line per item.
#[allow(dead_code)]
pub fn generate_list(items: usize) -> String {
    (0..items)
        .map(|i| format!("- item {i} with **bold** text"))
        .collect::<Vec<_>>()
        .join("\n\n")
}
