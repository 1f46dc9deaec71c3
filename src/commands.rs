//! Menu commands typed at the prompt
//!
//! Each line is split with shell quoting rules and parsed with clap, so
//! `add "New York" -5` and `corner lower-left` work as expected.

use clap::{Parser, Subcommand, ValueEnum};
use worldclock_core::{Corner, Orientation};

/// A menu action the application can perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    Add { label: String, offset: i32 },
    Modify { label: String, offset: i32 },
    Delete,
    ToggleOnTop,
    Corner(Corner),
    Orientation(Orientation),
    Save,
    About,
    Exit,
    List,
    /// One-based position in display order
    Select(usize),
}

#[derive(Parser)]
#[command(name = "worldclock", about = "World Clock commands", disable_version_flag = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a clock at the end of the row
    Add {
        label: String,
        /// Hours from UTC, -23 to 23
        #[arg(allow_negative_numbers = true)]
        offset: i32,
    },
    /// Change the selected clock
    Modify {
        label: String,
        #[arg(allow_negative_numbers = true)]
        offset: i32,
    },
    /// Delete the selected clock
    Delete,
    /// Toggle always-on-top
    OnTop,
    /// Pin the clocks to a screen corner
    Corner {
        #[arg(value_enum)]
        corner: CornerArg,
    },
    /// Lay clocks out in a row or a column
    Orientation {
        #[arg(value_enum)]
        orientation: OrientationArg,
    },
    /// Save clocks and layout
    Save,
    About,
    Exit,
    /// List clocks in display order
    List,
    /// Select the clock at a position (1 is the first)
    Select { index: usize },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CornerArg {
    #[value(alias = "ul")]
    UpperLeft,
    #[value(alias = "ur")]
    UpperRight,
    #[value(alias = "ll")]
    LowerLeft,
    #[value(alias = "lr")]
    LowerRight,
}

impl From<CornerArg> for Corner {
    fn from(arg: CornerArg) -> Self {
        match arg {
            CornerArg::UpperLeft => Corner::UpperLeft,
            CornerArg::UpperRight => Corner::UpperRight,
            CornerArg::LowerLeft => Corner::LowerLeft,
            CornerArg::LowerRight => Corner::LowerRight,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrientationArg {
    #[value(alias = "h")]
    Horizontal,
    #[value(alias = "v")]
    Vertical,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Horizontal => Orientation::Horizontal,
            OrientationArg::Vertical => Orientation::Vertical,
        }
    }
}

/// Parse one input line. Blank lines parse to `None`.
///
/// Errors carry clap's rendered message, including `help` output.
pub fn parse_line(line: &str) -> Result<Option<MenuCommand>, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    if args.is_empty() {
        return Ok(None);
    }
    args.insert(0, "worldclock".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    Ok(cli.command.map(|command| match command {
        Commands::Add { label, offset } => MenuCommand::Add { label, offset },
        Commands::Modify { label, offset } => MenuCommand::Modify { label, offset },
        Commands::Delete => MenuCommand::Delete,
        Commands::OnTop => MenuCommand::ToggleOnTop,
        Commands::Corner { corner } => MenuCommand::Corner(corner.into()),
        Commands::Orientation { orientation } => MenuCommand::Orientation(orientation.into()),
        Commands::Save => MenuCommand::Save,
        Commands::About => MenuCommand::About,
        Commands::Exit => MenuCommand::Exit,
        Commands::List => MenuCommand::List,
        Commands::Select { index } => MenuCommand::Select(index),
    }))
}
