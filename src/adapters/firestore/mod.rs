//! Cloud Firestore adapter.
//!
//! Implements the `DocumentStore` port over the Firestore REST API using a
//! service-account key. Access tokens are obtained with the JWT bearer flow
//! and cached in memory.

mod credentials;
mod firestore_store;
mod token_provider;
mod value_codec;

pub use credentials::{CredentialSource, CredentialsError, ServiceAccountKey, DEFAULT_TOKEN_URI};
pub use firestore_store::{
    build_commit_request, FirestoreConfig, FirestoreDocumentStore, DEFAULT_FIRESTORE_BASE_URL,
};
pub use token_provider::{AccessTokenProvider, AssertionClaims, DATASTORE_SCOPE};
pub use value_codec::{encode_fields, encode_value, field_path};
