use clap::{Parser, Subcommand};

use crate::models::Resource;
use crate::table::PageSize;

#[derive(Parser)]
#[command(name = "tenant-console")]
#[command(about = "Terminal console for managing companies, applications, users and master data")]
#[command(version)]
pub struct Cli {
    /// Override the API base URL (CONSOLE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive console (default)
    Tui {
        /// Resource list to open on startup
        #[arg(short, long, value_enum)]
        resource: Option<Resource>,
    },

    /// Print one page of a resource list and exit
    List {
        /// Resource to list
        #[arg(value_enum)]
        resource: Resource,

        /// Case-insensitive substring filter over the searchable columns
        #[arg(short, long)]
        query: Option<String>,

        /// Column key to sort by
        #[arg(short, long)]
        sort: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Page to print, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Rows per page (10, 25, 50 or 100)
        #[arg(long)]
        page_size: Option<PageSize>,
    },

    /// Delete one record by id
    Delete {
        /// Resource the record belongs to
        #[arg(value_enum)]
        resource: Resource,

        /// Record id
        id: String,
    },
}

impl Commands {
    /// Whether the command takes over the terminal
    pub fn is_interactive(&self) -> bool {
        matches!(self, Commands::Tui { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_means_console() {
        let cli = Cli::try_parse_from(["tenant-console"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.api_url.is_none());
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from([
            "tenant-console",
            "list",
            "master-data",
            "--query",
            "acme",
            "--sort",
            "label",
            "--desc",
            "--page",
            "2",
            "--page-size",
            "25",
            "--api-url",
            "https://admin.example.com/api",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("https://admin.example.com/api"));
        match cli.command {
            Some(Commands::List { resource, query, sort, desc, page, page_size }) => {
                assert_eq!(resource, Resource::MasterData);
                assert_eq!(query.as_deref(), Some("acme"));
                assert_eq!(sort.as_deref(), Some("label"));
                assert!(desc);
                assert_eq!(page, 2);
                assert_eq!(page_size, Some(PageSize::TwentyFive));
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_rejects_bad_page_size_and_desc_without_sort() {
        assert!(Cli::try_parse_from(["tenant-console", "list", "users", "--page-size", "20"]).is_err());
        assert!(Cli::try_parse_from(["tenant-console", "list", "users", "--desc"]).is_err());
    }

    #[test]
    fn test_parse_tui_and_delete() {
        let cli = Cli::try_parse_from(["tenant-console", "tui", "--resource", "companies"]).unwrap();
        let command = cli.command.unwrap();
        assert!(command.is_interactive());
        assert!(matches!(command, Commands::Tui { resource: Some(Resource::Companies) }));

        let cli = Cli::try_parse_from(["tenant-console", "delete", "users", "42"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Delete { resource: Resource::Users, ref id }) if id == "42"
        ));
    }
}
