//! Startup banner and URL display

use super::config::is_all_interfaces;
use super::constants::APP_NAME;

/// Print the startup banner with URLs
pub fn print_banner(host: &str, port: u16, database: &str, mcp_enabled: bool) {
    for line in banner_lines(host, port, database, mcp_enabled) {
        println!("{}", line);
    }
}

fn banner_lines(host: &str, port: u16, database: &str, mcp_enabled: bool) -> Vec<String> {
    // Use localhost for display when binding to all interfaces
    let display_host = if is_all_interfaces(host) {
        "localhost"
    } else {
        host
    };
    let base = format!("http://{}:{}", display_host, port);

    // Label width: "Database:" padded for alignment
    const W: usize = 10;

    let mut lines = vec![
        String::new(),
        format!(
            "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
            APP_NAME,
            env!("CARGO_PKG_VERSION")
        ),
        String::new(),
        format!(
            "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}/api/v1/revenue",
            "API:", base
        ),
        format!(
            "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}/api/docs",
            "Docs:", base
        ),
    ];
    if mcp_enabled {
        lines.push(format!(
            "  \x1b[35m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}/mcp",
            "MCP:", base
        ));
    }
    lines.push(format!(
        "  \x1b[90m➜  {:<W$} {}\x1b[0m",
        "Database:", database
    ));
    lines.push(String::new());
    lines
}
