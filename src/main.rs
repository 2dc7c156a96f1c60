use {
    anyhow::{Context, Result},
    clap::{Parser, ValueEnum},
    colored::{ColoredString, Colorize},
    log::debug,
    scratchstack_policy_lens::{
        highlight_html, highlight_tokens, NodeKind, PolicySummary, ResourceTreeNode, SessionState, TokenKind,
    },
    std::{
        fs,
        io::{self, Read, Write},
        path::PathBuf,
        process::ExitCode,
    },
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum View {
    /// Policy overview and per-statement details.
    Summary,
    /// Resources grouped by service.
    Tree,
    /// The summary as JSON.
    Json,
    /// The policy text with syntax highlighting.
    Highlight,
    /// Every view above.
    All,
}

/// Validate an IAM policy and show its summary, permission tree, and structure.
#[derive(Debug, Parser)]
#[command(name = "policy-lens", version, about)]
struct Cli {
    /// Policy file to read. Reads standard input when omitted or "-".
    file: Option<PathBuf>,

    /// What to show for a valid policy.
    #[arg(long, value_enum, default_value_t = View::All)]
    view: View,

    /// Render highlighted policy text as HTML spans instead of terminal colors.
    #[arg(long)]
    html: bool,

    /// Disable terminal colors. NO_COLOR in the environment has the same effect.
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("policy-lens: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let text = read_input(cli.file.as_ref())?;
    let state = SessionState::with_text(text).validate();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let valid = state.validation().map(|v| v.is_valid()).unwrap_or(false);
    if !valid {
        let message = state.validation().and_then(|v| v.error()).unwrap_or("Invalid JSON format");
        writeln!(io::stderr(), "{} {}", "✗ Invalid:".red().bold(), message)?;
        if matches!(cli.view, View::Highlight | View::All) {
            write_highlighted(&mut out, state.text(), cli.html)?;
        }
        return Ok(ExitCode::from(1));
    }

    writeln!(out, "{}", "✓ Valid IAM Policy JSON".green().bold())?;

    let summary = match state.summary() {
        Some(summary) => summary,
        None => {
            debug!("Validated policy produced no summary");
            return Ok(ExitCode::from(1));
        }
    };

    if matches!(cli.view, View::Summary | View::All) {
        write_summary(&mut out, summary)?;
    }

    if matches!(cli.view, View::Tree | View::All) {
        write_tree(&mut out, &state.tree())?;
    }

    if matches!(cli.view, View::Json | View::All) {
        writeln!(out, "\n{}", "JSON Structure:".bold())?;
        writeln!(out, "{}", summary)?;
    }

    if matches!(cli.view, View::Highlight | View::All) {
        write_highlighted(&mut out, state.text(), cli.html)?;
    }

    Ok(ExitCode::SUCCESS)
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            fs::read_to_string(path).with_context(|| format!("failed to read policy file {}", path.display()))
        }
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("failed to read policy from standard input")?;
            Ok(text)
        }
    }
}

fn write_summary<W: Write>(out: &mut W, summary: &PolicySummary) -> Result<()> {
    writeln!(out, "\n{}  Version: {}", "Policy Overview".bold(), summary.version())?;
    writeln!(
        out,
        "  Statements: {}  Actions: {}  Resources: {}",
        summary.statement_count(),
        summary.action_count(),
        summary.resource_count()
    )?;

    let mut badges = Vec::new();
    if summary.allow_count() > 0 {
        badges.push(format!("Allow ({})", summary.allow_count()).as_str().green().to_string());
    }
    if summary.deny_count() > 0 {
        badges.push(format!("Deny ({})", summary.deny_count()).as_str().red().to_string());
    }
    if !badges.is_empty() {
        writeln!(out, "  {}", badges.join("  "))?;
    }

    for (i, statement) in summary.statements().iter().enumerate() {
        let label = statement.effect().to_string();
        let effect = if statement.effect().is_allow() {
            label.as_str().green()
        } else {
            label.as_str().red()
        };

        writeln!(out, "\nStatement {} [{}]", i + 1, effect)?;
        writeln!(out, "  Services: {}", statement.services().join(", "))?;
        writeln!(out, "  Actions:")?;
        for action in statement.actions() {
            writeln!(out, "    {}", action)?;
        }
        writeln!(out, "  Resources:")?;
        for resource in statement.resources() {
            writeln!(out, "    {}", resource)?;
        }
        if let Some(conditions) = statement.conditions() {
            writeln!(out, "  Conditions:")?;
            let pretty = serde_json::to_string_pretty(conditions)?;
            for line in pretty.lines() {
                writeln!(out, "    {}", line)?;
            }
        }
    }

    Ok(())
}

fn write_tree<W: Write>(out: &mut W, tree: &[ResourceTreeNode]) -> Result<()> {
    writeln!(out, "\n{}", "Permission Tree".bold())?;
    if tree.is_empty() {
        writeln!(out, "  No resources to display.")?;
        return Ok(());
    }

    for node in tree {
        write_node(out, node, 1)?;
    }

    Ok(())
}

fn write_node<W: Write>(out: &mut W, node: &ResourceTreeNode, depth: usize) -> Result<()> {
    let mark = if node.is_allowed() {
        "✓".green()
    } else {
        "✗".red()
    };
    let indent = "  ".repeat(depth);

    match node.kind() {
        NodeKind::Service => {
            writeln!(out, "{}{} {} ({})", indent, mark, node.name().bold(), service_description(node.name()))?
        }
        NodeKind::Resource => writeln!(out, "{}{} {}", indent, mark, node.name().cyan())?,
        NodeKind::Action => writeln!(out, "{}- {}", indent, node.name())?,
    }

    for child in node.children() {
        write_node(out, child, depth + 1)?;
    }

    Ok(())
}

fn service_description(name: &str) -> &'static str {
    match name {
        "S3" => "AWS Simple Storage Service",
        "EC2" => "AWS Elastic Compute Cloud",
        "DYNAMODB" => "AWS DynamoDB",
        _ => "AWS Service",
    }
}

fn write_highlighted<W: Write>(out: &mut W, text: &str, html: bool) -> Result<()> {
    writeln!(out, "\n{}", "Policy:".bold())?;
    if html {
        writeln!(out, "{}", highlight_html(text))?;
        return Ok(());
    }

    for token in highlight_tokens(text) {
        write!(out, "{}", paint(token.kind, token.text))?;
    }
    writeln!(out)?;
    Ok(())
}

fn paint(kind: TokenKind, text: &str) -> ColoredString {
    match kind {
        TokenKind::Key => text.blue(),
        TokenKind::String => text.green(),
        TokenKind::Number => text.yellow(),
        TokenKind::Boolean => text.magenta(),
        TokenKind::Null => text.bright_black(),
        TokenKind::Plain => text.normal(),
    }
}
