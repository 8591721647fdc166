//! Feed transform: plan, optional download, URL rewrite.

use std::time::Duration;

use super::MirrorTarget;
use crate::feed::{self, FeedDocument};
use crate::http::HttpClient;
use crate::store::{DownloadReport, ImageStore};
use crate::url_model::file_name_from_url;

/// One record that has a usable source URL and file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedIcon {
    /// Position in the feed's icon list.
    pub index: usize,
    pub source_url: String,
    pub file_name: String,
}

/// Everything needed to fetch missing images into the store.
#[derive(Clone, Copy)]
pub struct Downloader<'a> {
    pub store: &'a ImageStore,
    pub client: &'a dyn HttpClient,
    pub timeout: Duration,
}

/// Output of running one [`MirrorTarget`] over a feed.
#[derive(Debug, Clone)]
pub struct MirrorPass {
    pub feed: FeedDocument,
    /// Records whose URL was rewritten.
    pub processed: usize,
    pub downloads: DownloadReport,
}

/// Selects records with a non-empty URL and a derivable file name.
pub fn plan_icons(feed: &FeedDocument) -> Vec<PlannedIcon> {
    feed.items()
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let Some(url) = feed::source_url(record) else {
                tracing::debug!(index, "record has no url, skipping");
                return None;
            };
            let Some(file_name) = file_name_from_url(url) else {
                tracing::debug!(index, url, "no file name in url, skipping");
                return None;
            };
            Some(PlannedIcon {
                index,
                source_url: url.to_string(),
                file_name,
            })
        })
        .collect()
}

/// Returns a copy of `feed` with each planned record pointing at
/// `base_url + file_name`. Records outside `planned` are unchanged.
pub fn rewrite(feed: &FeedDocument, planned: &[PlannedIcon], base_url: &str) -> FeedDocument {
    let mut out = feed.clone();
    if let Some(items) = out.items_mut() {
        for icon in planned {
            if let Some(record) = items.get_mut(icon.index) {
                feed::set_url(record, &format!("{base_url}{}", icon.file_name));
            }
        }
    }
    out
}

/// Runs `target` over `feed`. When the target downloads and a downloader is
/// given, each planned image goes through the store first; a failed download
/// still gets its link rewritten.
pub fn process(
    feed: &FeedDocument,
    target: &MirrorTarget,
    downloader: Option<&Downloader<'_>>,
) -> MirrorPass {
    let planned = plan_icons(feed);
    let mut downloads = DownloadReport::default();

    if target.download {
        match downloader {
            Some(downloader) => {
                for icon in &planned {
                    let outcome = downloader.store.ensure(
                        downloader.client,
                        &icon.source_url,
                        &icon.file_name,
                        downloader.timeout,
                    );
                    downloads.record(&outcome);
                }
            }
            None => tracing::warn!(mirror = %target.name, "no image store, rewriting links only"),
        }
    }

    MirrorPass {
        feed: rewrite(feed, &planned, &target.base_url),
        processed: planned.len(),
        downloads,
    }
}
