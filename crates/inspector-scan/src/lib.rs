//! Message boundary for a listing scan: extraction, review acquisition,
//! scoring and optional enrichment by the analysis backend.

pub mod analysis;
pub mod error;
pub mod message;
pub mod scanner;

pub use analysis::{AnalysisClient, AnalysisHealth, AnalysisResponse, AnalysisResults, AnalysisRisk};
pub use error::ScanError;
pub use message::{
    Assessment, FailedResponse, OpenReviewsResponse, Request, Response, ReviewFetch, ScanData,
    ScanResponse,
};
pub use scanner::Scanner;
