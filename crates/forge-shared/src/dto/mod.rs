//! Data Transfer Objects - request/response types for the API.

mod admin;
mod catalog;
mod forms;

pub use admin::{
    AdminProfile, AuthResponse, CategoryInput, CertificateInput, ClientInput, ExhibitionInput,
    LocalizedInput, LoginRequest, NewsInput, ProductInput, SolutionInput, SpecInput, UploadQuery,
    UploadResponse,
};
pub use catalog::{
    CategoryDetail, CategoryRef, CategoryView, CertificateView, ClientView, ExhibitionView,
    ExhibitionsPage, HomePage, NewsSummary, NewsView, ProductSummary, ProductView, SolutionView,
    SpecView,
};
pub use forms::{ContactReceipt, ContactRequest, NewsletterReceipt, NewsletterRequest};
