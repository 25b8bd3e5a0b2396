//! HTTP integration tests for the DocPdf API.

mod helpers;

mod convert_test;
mod download_test;
