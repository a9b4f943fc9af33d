//! ModelsLab realtime text-to-image.

mod client;
mod dto;

pub use client::ModelsLabClient;
pub use dto::{FetchBody, FetchResponse, Text2ImgBody, Text2ImgBodyBuilder, Text2ImgResponse};
