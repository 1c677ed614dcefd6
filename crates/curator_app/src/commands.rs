use std::collections::BTreeSet;

use anyhow::{bail, Result};
use curator_core::{
    preview, AssociationTarget, EntityId, NormalizedContent, ReconciliationOutcome, TagId,
};
use curator_engine::{
    AssociationReconciler, ContentFetchOrchestrator, ContentResource, ContentSource,
    HttpAssociationStore, RemoteClient, Tag, TagCatalog,
};
use curator_logging::{curator_info, curator_warn};

use crate::cli::{ContentArgs, ContentCommands, TagsCommands};

pub async fn tags(client: &RemoteClient, command: &TagsCommands) -> Result<()> {
    match command {
        TagsCommands::List { kind, id } => {
            let store = HttpAssociationStore::new(client.clone());
            let tags = store.tags_of(*kind, *id).await?;
            print!("{}", format_tags(&tags));
        }
        TagsCommands::Set { kind, id, tag_ids } => {
            set_tags(client, *kind, *id, tag_ids).await?;
        }
        TagsCommands::Catalog { query } => {
            let tags = TagCatalog::new(client.clone())
                .list_all(query.as_deref())
                .await?;
            print!("{}", format_tags(&tags));
        }
        TagsCommands::Create { name } => {
            let tag = TagCatalog::new(client.clone()).create(name).await?;
            println!("Created tag {} {}", tag.id, tag.name);
        }
        TagsCommands::Rename { id, name } => {
            let tag = TagCatalog::new(client.clone()).rename(*id, name).await?;
            println!("Renamed tag {} to {}", tag.id, tag.name);
        }
        TagsCommands::Delete { id } => {
            TagCatalog::new(client.clone()).delete(*id).await?;
            println!("Deleted tag {id}");
        }
    }
    Ok(())
}

async fn set_tags(
    client: &RemoteClient,
    kind: AssociationTarget,
    id: EntityId,
    tag_ids: &[TagId],
) -> Result<()> {
    let store = HttpAssociationStore::new(client.clone());
    let desired: BTreeSet<TagId> = tag_ids.iter().copied().collect();
    let outcome = AssociationReconciler::new(&store)
        .reconcile(kind, id, &desired)
        .await?;

    print!("{}", format_outcome(&outcome));
    if !outcome.is_complete() {
        bail!(
            "{} tag operation(s) on {kind} {id} failed",
            outcome.failures.len()
        );
    }
    curator_info!("Tags of {} {} reconciled: {}", kind, id, outcome.summary());
    Ok(())
}

pub async fn content(client: &RemoteClient, args: &ContentArgs) -> Result<()> {
    let source = match &args.command {
        ContentCommands::Page { url } => ContentSource::RawHtml { url: url.clone() },
        ContentCommands::Uri { id } => ContentSource::Normalized {
            resource: ContentResource::Uri,
            id: *id,
        },
        ContentCommands::Article { id } => ContentSource::Normalized {
            resource: ContentResource::Article,
            id: *id,
        },
    };

    let normalized = ContentFetchOrchestrator::new(client.clone())
        .fetch(&source)
        .await;
    println!("{}", render_content(normalized, args.preview)?);
    Ok(())
}

fn format_tags(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return "(no tags)\n".to_string();
    }
    tags.iter()
        .map(|tag| format!("{:>6}  {}\n", tag.id, tag.name))
        .collect()
}

fn format_outcome(outcome: &ReconciliationOutcome) -> String {
    let mut text = format!("{}\n", outcome.summary());
    for failure in &outcome.failures {
        text.push_str(&format!(
            "  failed to {} tag {}: {}\n",
            failure.operation, failure.tag_id, failure.error
        ));
    }
    text
}

fn render_content(content: NormalizedContent, max_chars: Option<usize>) -> Result<String> {
    match content {
        NormalizedContent::Markdown(markdown) => Ok(match max_chars {
            Some(max_chars) => preview(&markdown, max_chars),
            None => markdown,
        }),
        NormalizedContent::Error(message) => {
            curator_warn!("Content unavailable: {}", message);
            bail!(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_core::Operation;
    use pretty_assertions::assert_eq;

    fn tag_id(raw: u64) -> TagId {
        TagId::new(raw).unwrap()
    }

    #[test]
    fn tags_are_listed_one_per_line() {
        let tags = vec![
            Tag {
                id: tag_id(3),
                name: "rust".to_string(),
            },
            Tag {
                id: tag_id(12),
                name: "async".to_string(),
            },
        ];
        assert_eq!(format_tags(&tags), "     3  rust\n    12  async\n");
        assert_eq!(format_tags(&[]), "(no tags)\n");
    }

    #[test]
    fn outcome_lists_every_failure_under_the_summary() {
        let mut outcome = ReconciliationOutcome::default();
        outcome.record_success(Operation::Add);
        outcome.record_failure(Operation::Remove, tag_id(4), "404 Not Found");

        assert_eq!(
            format_outcome(&outcome),
            "1 added, 0 removed\n  failed to remove tag 4: 404 Not Found\n"
        );
    }

    #[test]
    fn content_preview_is_opt_in() {
        let long = "x".repeat(30);
        let full = render_content(NormalizedContent::Markdown(long.clone()), None).unwrap();
        assert_eq!(full, long);

        let cut = render_content(NormalizedContent::Markdown(long), Some(10)).unwrap();
        assert_eq!(cut, format!("{}...", "x".repeat(10)));
    }

    #[test]
    fn content_error_becomes_command_failure() {
        let err = render_content(NormalizedContent::Error("gone".to_string()), None).unwrap_err();
        assert_eq!(err.to_string(), "gone");
    }
}
