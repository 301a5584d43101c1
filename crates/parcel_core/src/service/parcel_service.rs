//! Parcel use-case service.
//!
//! # Responsibility
//! - Provide lifecycle entry points (register, advance, re-address, delete).
//! - Delegate persistence and state guards to `ParcelStore` implementations.
//!
//! # Invariants
//! - New parcels always start in `registered` with a UTC RFC3339 timestamp.
//! - Status only moves forward: registered -> sent -> delivered.
//! - Log lines carry identifiers only, never addresses.

use crate::model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
use crate::repo::parcel_repo::{ParcelStore, RepoError, RepoResult};
use log::{info, warn};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Use-case service wrapper for parcel operations.
pub struct ParcelService<S: ParcelStore> {
    store: S,
}

impl<S: ParcelStore> ParcelService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a new parcel for `client` stamped with the current UTC time.
    pub fn register(&self, client: ClientId, address: impl Into<String>) -> RepoResult<Parcel> {
        self.register_at(client, address, OffsetDateTime::now_utc())
    }

    /// Registers a new parcel with an explicit creation time.
    ///
    /// # Contract
    /// - Status is `registered`.
    /// - Returned parcel carries the storage-assigned number.
    pub fn register_at(
        &self,
        client: ClientId,
        address: impl Into<String>,
        created_at: OffsetDateTime,
    ) -> RepoResult<Parcel> {
        let created_at = created_at.format(&Rfc3339).map_err(|err| {
            RepoError::InvalidData(format!("cannot format creation timestamp: {err}"))
        })?;
        let mut parcel = Parcel::new(client, address, created_at);

        let result = self.store.add(&parcel);
        log_outcome("parcel_register", &result, |number| {
            format!("client={client} number={number}")
        });
        parcel.number = result?;
        Ok(parcel)
    }

    /// Lists every parcel owned by `client`, ordered by number.
    pub fn client_parcels(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        self.store.get_by_client(client)
    }

    /// Moves the parcel to its next lifecycle state.
    ///
    /// Returns the new status, or `None` when the parcel is already
    /// delivered or carries a status outside the lifecycle (nothing is
    /// written in that case).
    pub fn next_status(&self, number: ParcelNumber) -> RepoResult<Option<ParcelStatus>> {
        let parcel = self.store.get(number)?;
        let Some(next) = parcel.status.next() else {
            info!(
                "event=parcel_next_status module=service status=skipped number={number} current={}",
                parcel.status
            );
            return Ok(None);
        };

        let result = self.store.set_status(number, &next);
        log_outcome("parcel_next_status", &result, |_| {
            format!("number={number} from={} to={next}", parcel.status)
        });
        result?;
        Ok(Some(next))
    }

    /// Changes the delivery address of a registered parcel.
    pub fn change_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        let result = self.store.set_address(number, address);
        log_outcome("parcel_change_address", &result, |_| format!("number={number}"));
        result
    }

    /// Deletes a registered parcel.
    pub fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        let result = self.store.delete(number);
        log_outcome("parcel_delete", &result, |_| format!("number={number}"));
        result
    }
}

fn log_outcome<T, F>(event: &str, result: &RepoResult<T>, fields: F)
where
    F: FnOnce(&T) -> String,
{
    match result {
        Ok(value) => info!("event={event} module=service status=ok {}", fields(value)),
        Err(RepoError::NotFound(number)) => warn!(
            "event={event} module=service status=error error_code=not_found number={number}"
        ),
        Err(err) => warn!("event={event} module=service status=error error={err}"),
    }
}
