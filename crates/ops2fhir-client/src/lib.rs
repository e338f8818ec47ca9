//! HTTP submission of generated resources to a FHIR R4 endpoint.
//!
//! The protocol per resource is validate-then-create: POST the JSON body to
//! `<base>/<Type>/$validate`, refuse to proceed when the server reports any
//! issue of severity `error`, then POST to `<base>/<Type>` and read the
//! assigned id from the response. Every resource type goes through the same
//! two steps.

#![deny(unsafe_code)]

mod client;
mod error;
mod outcome;

pub use client::{CreatedResource, FHIR_MEDIA_TYPE, FhirClient, FhirEndpoint};
pub use error::{ClientError, Result};
pub use outcome::{Issue, OperationOutcome};
