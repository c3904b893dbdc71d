use clap::Subcommand;
use studyroom_core::{HistoryStore, MemoDraft, MemoFilter};

use super::{print_json, today};

#[derive(Subcommand)]
pub enum MemoAction {
    /// Add a memo (text, an image, or both)
    Add {
        /// Memo text
        #[arg(default_value = "")]
        text: String,
        #[arg(long, default_value = "")]
        subject: String,
        /// Comma separated tags
        #[arg(long, default_value = "")]
        tags: String,
        /// Path or URI of an attached picture
        #[arg(long)]
        image: Option<String>,
    },
    /// List memos, newest first
    List {
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        /// Matches text or subject
        #[arg(long)]
        keyword: Option<String>,
    },
    /// Delete a memo by id
    Remove { id: String },
}

pub fn run(action: MemoAction) -> Result<(), Box<dyn std::error::Error>> {
    let history = HistoryStore::open()?;
    let mut memos = history.load_memos()?;

    match action {
        MemoAction::Add {
            text,
            subject,
            tags,
            image,
        } => {
            let draft = MemoDraft {
                text,
                subject,
                tags,
                image_uri: image,
            };
            let memo = memos.add(&draft, today())?.clone();
            history.save_memos(&memos)?;
            print_json(&memo)?;
        }
        MemoAction::List {
            subject,
            tag,
            keyword,
        } => {
            let filter = MemoFilter {
                subject,
                tag,
                keyword,
            };
            print_json(&memos.filter(&filter))?;
        }
        MemoAction::Remove { id } => {
            let removed = memos.remove(&id)?;
            history.save_memos(&memos)?;
            print_json(&removed)?;
        }
    }
    Ok(())
}
