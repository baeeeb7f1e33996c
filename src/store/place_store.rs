//! Merge-on-write place store with lazy, self-healing cache hydration.
//!
//! Saves never destroy fields an update doesn't mention: the incoming
//! partial update is deep-merged onto the existing record, the derived
//! fields are recomputed from the key, and the result is written through.
//! Reads are self-healing: a record whose externally-sourced repository
//! linkage is stale or incomplete is rehydrated from the platform before
//! it is handed back, which makes every read a potential write. Callers
//! needing a pure read must go to the persistence seam directly.
//!
//! No locking is performed anywhere: concurrent saves to the same key race
//! at the persistence layer and the last write to complete wins.

use futures::future::try_join_all;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::jive::{CommunityResolver, JiveSession, PlaceApi};
use crate::persistence::PersistentStore;
use crate::types::{PlaceRecord, PlaceUrl};

use super::error::StoreError;
use super::merge::deep_merge;

/// The persistence collection place records live in.
pub const PLACES_COLLECTION: &str = "places";

/// The record store for linked places.
///
/// Generic over its three collaborators: the key-value persistence seam,
/// the community resolver and the platform REST facade. All construction
/// is explicit; nothing here is process-global.
#[derive(Debug)]
pub struct PlaceStore<P, C, A> {
    persistence: P,
    communities: C,
    place_api: A,
}

impl<P, C, A> PlaceStore<P, C, A>
where
    P: PersistentStore + Sync,
    C: CommunityResolver + Sync,
    A: PlaceApi + Sync,
{
    pub fn new(persistence: P, communities: C, place_api: A) -> Self {
        PlaceStore {
            persistence,
            communities,
            place_api,
        }
    }

    /// The underlying persistence seam.
    ///
    /// The read operations on the store itself may write (self-healing);
    /// callers needing a pure read go through this instead.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Saves a partial update under a place key.
    ///
    /// The existing record (an empty object when the key is new) is deep-
    /// copied and the update merged onto it field-by-field, so fields the
    /// update doesn't mention survive. `placeUrl`, `jiveUrl` and `placeID`
    /// are recomputed from the key on every save, and `invalidCache` is set
    /// to the negation of `suppress_invalidation` - omitting suppression
    /// stamps the cache stale.
    ///
    /// No external properties are gathered here; callers supply validated
    /// data and read paths do the healing.
    pub async fn save(
        &self,
        place_url: &str,
        update: Value,
        suppress_invalidation: bool,
    ) -> Result<PlaceRecord, StoreError> {
        let key = PlaceUrl::parse(place_url)?;
        self.save_merged(&key, update, suppress_invalidation).await
    }

    /// Stamps a record's cache invalid, then immediately rehydrates it.
    ///
    /// On success the returned record has fresh externally-sourced fields
    /// and `invalidCache == false`.
    pub async fn invalidate_cache(&self, place_url: &str) -> Result<PlaceRecord, StoreError> {
        let key = PlaceUrl::parse(place_url)?;
        let record = self
            .save_merged(&key, Value::Object(Map::new()), false)
            .await?;
        self.refresh(record).await
    }

    /// Reads every place record, refreshing each one's cached repository
    /// linkage as needed.
    ///
    /// Refreshes run concurrently, one independent unit of work per record.
    /// The first refresh failure aborts the batch and propagates; callers
    /// wanting per-record isolation can iterate keys with
    /// [`get_place_by_url`](Self::get_place_by_url).
    pub async fn get_all_places(&self) -> Result<Vec<PlaceRecord>, StoreError> {
        let values = self
            .persistence
            .find(PLACES_COLLECTION)
            .await
            .map_err(StoreError::persistence)?;

        try_join_all(values.into_iter().map(|value| async move {
            let record = decode_record(value)?;
            self.refresh(record).await
        }))
        .await
    }

    /// Reads a single record by its place key, refreshing its cached
    /// repository linkage as needed. Yields `None` when no record exists.
    pub async fn get_place_by_url(
        &self,
        place_url: &str,
    ) -> Result<Option<PlaceRecord>, StoreError> {
        let key = PlaceUrl::parse(place_url)?;
        let Some(value) = self
            .persistence
            .find_by_id(PLACES_COLLECTION, key.as_str())
            .await
            .map_err(StoreError::persistence)?
        else {
            return Ok(None);
        };

        let record = decode_record(value)?;
        self.refresh(record).await.map(Some)
    }

    /// Fetch-merge-stamp-persist under an already validated key.
    async fn save_merged(
        &self,
        key: &PlaceUrl,
        update: Value,
        suppress_invalidation: bool,
    ) -> Result<PlaceRecord, StoreError> {
        let existing = self
            .persistence
            .find_by_id(PLACES_COLLECTION, key.as_str())
            .await
            .map_err(StoreError::persistence)?;

        let mut record = existing.unwrap_or_else(|| Value::Object(Map::new()));
        deep_merge(&mut record, update);

        let Value::Object(map) = &mut record else {
            return Err(StoreError::UpdateNotAnObject {
                key: key.as_str().to_string(),
            });
        };
        map.insert(
            "placeUrl".to_string(),
            Value::String(key.as_str().to_string()),
        );
        map.insert("jiveUrl".to_string(), Value::String(key.jive_url()));
        map.insert(
            "placeID".to_string(),
            Value::String(key.place_id().to_string()),
        );
        map.insert(
            "invalidCache".to_string(),
            Value::Bool(!suppress_invalidation),
        );

        self.persistence
            .save(PLACES_COLLECTION, key.as_str(), record.clone())
            .await
            .map_err(StoreError::persistence)?;

        debug!(place = %key, stamped = !suppress_invalidation, "saved place record");
        decode_record(record)
    }

    /// Rehydrates a record's externally-sourced repository linkage.
    ///
    /// Skipped entirely for records with no platform linkage (no `jive`
    /// field): those come back untouched, with no collaborator calls made.
    /// Otherwise, when the cache is stamped stale or the `github`
    /// sub-object is missing either field, the owning community is
    /// resolved, an authenticated session built from the record's stored
    /// token pair, and the repository owner/name pair fetched from the
    /// place's extended properties. Only the `github` sub-object is written
    /// back, with invalidation suppressed so the refresh cannot re-trigger
    /// itself.
    async fn refresh(&self, record: PlaceRecord) -> Result<PlaceRecord, StoreError> {
        let Some(jive) = record.jive.as_ref() else {
            return Ok(record);
        };
        if !record.cache_stale() {
            return Ok(record);
        }

        debug!(place = %record.place_url, "rehydrating repository linkage");

        let community = self
            .communities
            .find_by_context_url(&record.jive_url)
            .await
            .map_err(|e| StoreError::Community {
                jive_url: record.jive_url.clone(),
                source: Box::new(e),
            })?;

        let session = JiveSession::new(
            record.place_url.as_str(),
            jive.access_token.as_str(),
            jive.refresh_token.as_str(),
        );
        let path = format!("places/{}", record.place_id);
        let props = self
            .place_api
            .get_all_ext_props(&community, &session, &path)
            .await
            .map_err(|e| StoreError::ExtProps {
                path: path.clone(),
                source: Box::new(e),
            })?;

        let mut github = record.github.clone().unwrap_or_default();
        github.repo = props.repo;
        github.repo_owner = props.repo_owner;

        let key = PlaceUrl::parse(record.place_url.as_str())?;
        self.save_merged(&key, json!({ "github": github }), true)
            .await
    }
}

/// Decodes a persisted value into the record shape, keeping the key in the
/// error when the value is malformed.
fn decode_record(value: Value) -> Result<PlaceRecord, StoreError> {
    let key = value
        .get("placeUrl")
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
        .to_string();
    PlaceRecord::from_value(value).map_err(|source| StoreError::MalformedRecord { key, source })
}
