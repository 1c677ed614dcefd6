use std::path::PathBuf;

use clap::{Parser, Subcommand};
use curator_core::{AssociationTarget, EntityId, TagId};

use crate::config::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(name = "curator")]
#[command(about = "Reconcile entity tags and read normalized content from a curator server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server base URL (overrides the config file)
    #[arg(short, long, global = true, env = "CURATOR_SERVER_URL")]
    pub server: Option<String>,

    /// Path to the RON config file
    #[arg(short, long, global = true, env = "CURATOR_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect and change tag associations and the tag catalog
    Tags(TagsArgs),
    /// Print an entity's content as Markdown
    Content(ContentArgs),
}

#[derive(clap::Args, Debug)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub command: TagsCommands,
}

#[derive(Subcommand, Debug)]
pub enum TagsCommands {
    /// Show the tags currently attached to an entity
    List {
        /// connection, feed, article, person or uri
        kind: AssociationTarget,
        id: EntityId,
    },
    /// Make an entity carry exactly the given tag ids
    Set {
        kind: AssociationTarget,
        id: EntityId,
        /// Desired tag ids; none clears every tag
        tag_ids: Vec<TagId>,
    },
    /// List every tag known to the server
    Catalog {
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Create a tag
    Create { name: String },
    /// Rename a tag
    Rename { id: TagId, name: String },
    /// Delete a tag
    Delete { id: TagId },
}

#[derive(clap::Args, Debug)]
pub struct ContentArgs {
    #[command(subcommand)]
    pub command: ContentCommands,

    /// Truncate the printed Markdown (default 1000 characters)
    #[arg(
        long,
        global = true,
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "1000"
    )]
    pub preview: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum ContentCommands {
    /// Download a web page and convert its main content locally
    Page { url: String },
    /// Server-normalized content of a URI entity
    Uri { id: EntityId },
    /// Server-normalized content of an article
    Article { id: EntityId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use curator_core::DEFAULT_PREVIEW_CHARS;
    use pretty_assertions::assert_eq;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_tag_set_with_ids() {
        let cli = Cli::try_parse_from(["curator", "tags", "set", "feeds", "7", "3", "1"]).unwrap();
        match cli.command {
            Commands::Tags(TagsArgs {
                command: TagsCommands::Set { kind, id, tag_ids },
            }) => {
                assert_eq!(kind, AssociationTarget::Feed);
                assert_eq!(id, 7);
                let raw: Vec<u64> = tag_ids.into_iter().map(TagId::get).collect();
                assert_eq!(raw, vec![3, 1]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_tag_id_and_unknown_kind() {
        assert!(Cli::try_parse_from(["curator", "tags", "set", "feed", "7", "0"]).is_err());
        assert!(Cli::try_parse_from(["curator", "tags", "list", "planet", "7"]).is_err());
    }

    #[test]
    fn preview_flag_defaults_when_given_bare() {
        let cli =
            Cli::try_parse_from(["curator", "content", "uri", "5", "--preview"]).unwrap();
        let Commands::Content(args) = cli.command else {
            panic!("expected content command");
        };
        assert_eq!(args.preview, Some(DEFAULT_PREVIEW_CHARS));

        let cli = Cli::try_parse_from(["curator", "content", "--preview=20", "article", "5"])
            .unwrap();
        let Commands::Content(args) = cli.command else {
            panic!("expected content command");
        };
        assert_eq!(args.preview, Some(20));
    }

    #[test]
    fn global_flags_reach_subcommands() {
        let cli = Cli::try_parse_from([
            "curator",
            "tags",
            "catalog",
            "--server",
            "http://example.test",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.server.as_deref(), Some("http://example.test"));
        assert!(cli.verbose);
    }
}
