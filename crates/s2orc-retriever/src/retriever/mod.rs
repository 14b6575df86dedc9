//! Paginated retrieval and accumulation of paper records.
//!
//! A [`Retriever`] turns one logical request (query, sample size, year
//! window) into a sequence of bounded search calls and merges every page
//! into a single deduplicated mapping keyed by paper ID. The strategy
//! depends on the requested size:
//!
//! - up to [`api::BATCH_LIMIT`]: one request at offset 0
//! - up to [`api::PAGINATED_LIMIT`]: offset pagination over the full window
//! - at or above [`api::PAGINATED_LIMIT`]: the window is split into year
//!   pairs and each partition is paginated separately into the shared
//!   accumulator
//!
//! All requests are issued strictly one at a time; nothing here spawns
//! tasks or holds two calls in flight.

mod progress;
mod year;

pub use progress::{NoProgress, Progress, TracingProgress};
pub use year::{YearPairing, YearRange};

use std::collections::HashMap;
use std::sync::Arc;

use crate::client::SearchClient;
use crate::config::{api, fields};
use crate::error::{RetrieveError, RetrieveResult};
use crate::models::{Paper, SearchPage};

/// Deduplicated retrieval result, keyed by paper ID.
pub type ResultMap = HashMap<String, Paper>;

/// Merge one page of results into the accumulator.
///
/// Records are keyed by paper ID; a colliding ID overwrites the earlier
/// record (last-write-wins). Returns the number of previously unseen IDs,
/// which is what drives both the stop threshold and the offset advance of
/// the pagination loop.
pub fn merge_page(results: &mut ResultMap, page: SearchPage) -> usize {
    let mut new_records = 0;
    for paper in page.data {
        if results.insert(paper.paper_id.clone(), paper).is_none() {
            new_records += 1;
        }
    }
    new_records
}

/// Retrieves paper records across paginated search requests.
pub struct Retriever {
    /// API client; every request goes through it sequentially.
    client: Arc<SearchClient>,

    /// Fields requested for each record.
    fields: &'static [&'static str],

    /// Page size for paginated requests.
    batch_limit: usize,

    /// Threshold at which retrieval switches to year partitioning.
    paginated_limit: usize,

    /// How year windows are split into partitions.
    pairing: YearPairing,

    /// Progress observer.
    progress: Arc<dyn Progress>,
}

impl Retriever {
    /// Create a retriever with default limits and the embedding field set.
    #[must_use]
    pub fn new(client: Arc<SearchClient>) -> Self {
        Self {
            client,
            fields: fields::EMBEDDING,
            batch_limit: api::BATCH_LIMIT,
            paginated_limit: api::PAGINATED_LIMIT,
            pairing: YearPairing::default(),
            progress: Arc::new(NoProgress),
        }
    }

    /// Override the record fields requested from the API.
    #[must_use]
    pub fn with_fields(mut self, fields: &'static [&'static str]) -> Self {
        self.fields = fields;
        self
    }

    /// Override the batch and year-partitioning thresholds.
    #[must_use]
    pub fn with_limits(mut self, batch_limit: usize, paginated_limit: usize) -> Self {
        self.batch_limit = batch_limit;
        self.paginated_limit = paginated_limit;
        self
    }

    /// Set the year-pairing policy for large-volume retrieval.
    #[must_use]
    pub fn with_pairing(mut self, pairing: YearPairing) -> Self {
        self.pairing = pairing;
        self
    }

    /// Attach a progress observer.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn Progress>) -> Self {
        self.progress = progress;
        self
    }

    /// Retrieve up to `sample_size` papers matching `query` published in
    /// `[start_year, end_year)`.
    ///
    /// The returned size is best-effort: the endpoint may hold fewer
    /// matching records than requested, which is not an error. A window
    /// too short to partition (`end_year - start_year <= 1`) on the
    /// large-volume path yields an empty mapping without issuing any
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`RetrieveError::Validation`] for a zero sample size or a
    /// reversed year window, and [`RetrieveError::Client`] when any
    /// request fails; a failed request aborts the whole session and no
    /// partial mapping is returned.
    pub async fn search_papers(
        &self,
        query: &str,
        sample_size: usize,
        start_year: i32,
        end_year: i32,
    ) -> RetrieveResult<ResultMap> {
        if sample_size == 0 {
            return Err(RetrieveError::validation("sample_size", "must be positive"));
        }
        if start_year > end_year {
            return Err(RetrieveError::validation(
                "start_year",
                format!("window is reversed: {start_year} > {end_year}"),
            ));
        }

        let years = YearRange::new(start_year, end_year);
        let mut results = ResultMap::new();

        self.progress.begin(sample_size);

        if sample_size >= self.paginated_limit {
            self.paginate_by_year(query, sample_size, years, &mut results).await?;
        } else if sample_size > self.batch_limit {
            self.paginate_by_batch(query, sample_size, years, &mut results).await?;
        } else {
            let page = self.client.search_papers(query, 0, sample_size, self.fields, years).await?;
            let new_records = merge_page(&mut results, page);
            self.progress.records_merged(new_records);
        }

        self.progress.finish();
        Ok(results)
    }

    /// Fetch `sample_size` new records into `results` by repeated
    /// fixed-size requests with an advancing offset.
    ///
    /// The stop threshold is relative to the accumulator size at entry, so
    /// successive partition calls each contribute their own share of new
    /// records. The offset advances by the count of newly merged records;
    /// a page of pure duplicates instead advances by the raw page length
    /// so the loop always makes forward progress. An empty page, or a page
    /// without a continuation offset, means the endpoint is exhausted for
    /// this window and ends the loop short of the threshold.
    async fn paginate_by_batch(
        &self,
        query: &str,
        sample_size: usize,
        years: YearRange,
        results: &mut ResultMap,
    ) -> RetrieveResult<()> {
        let size_limit = results.len() + sample_size;
        let mut offset = 0;

        while results.len() < size_limit {
            let page =
                self.client.search_papers(query, offset, self.batch_limit, self.fields, years).await?;

            let page_len = page.data.len();
            let has_more = page.has_more();
            let new_records = merge_page(results, page);
            self.progress.records_merged(new_records);
            tracing::debug!(offset, page_len, new_records, accumulated = results.len(), %years, "merged page");

            if page_len == 0 {
                break;
            }
            offset += if new_records == 0 { page_len } else { new_records };
            if !has_more {
                break;
            }
        }

        Ok(())
    }

    /// Fetch a large sample by splitting the window into year pairs and
    /// paginating each partition into the shared accumulator.
    ///
    /// Each partition is asked for `round(sample_size / partitions)` new
    /// records and runs to completion before the next begins, in
    /// chronological order.
    async fn paginate_by_year(
        &self,
        query: &str,
        sample_size: usize,
        years: YearRange,
        results: &mut ResultMap,
    ) -> RetrieveResult<()> {
        let partitions = years.pairs(self.pairing);
        if partitions.is_empty() {
            tracing::debug!(%years, "window too short to partition, nothing to fetch");
            return Ok(());
        }

        let per_partition = (sample_size as f64 / partitions.len() as f64).round() as usize;

        for partition in partitions {
            self.progress.partition_started(partition);
            self.paginate_by_batch(query, per_partition, partition, results).await?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for Retriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retriever")
            .field("batch_limit", &self.batch_limit)
            .field("paginated_limit", &self.paginated_limit)
            .field("pairing", &self.pairing)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(ids: &[&str]) -> SearchPage {
        SearchPage {
            total: ids.len() as i64,
            offset: 0,
            next: None,
            data: ids
                .iter()
                .map(|id| Paper { paper_id: (*id).to_string(), ..Paper::default() })
                .collect(),
        }
    }

    #[test]
    fn test_merge_counts_only_new_ids() {
        let mut results = ResultMap::new();
        assert_eq!(merge_page(&mut results, page_of(&["a", "b", "c"])), 3);
        assert_eq!(merge_page(&mut results, page_of(&["b", "c", "d"])), 1);
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn test_merge_same_page_twice_is_idempotent() {
        let mut results = ResultMap::new();
        merge_page(&mut results, page_of(&["a", "b"]));
        let second = merge_page(&mut results, page_of(&["a", "b"]));
        assert_eq!(second, 0);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_merge_overwrites_on_collision() {
        let mut results = ResultMap::new();
        let mut first = page_of(&["a"]);
        first.data[0].title = Some("old".to_string());
        merge_page(&mut results, first);

        let mut second = page_of(&["a"]);
        second.data[0].title = Some("new".to_string());
        merge_page(&mut results, second);

        assert_eq!(results["a"].title.as_deref(), Some("new"));
        assert_eq!(results.len(), 1);
    }
}
