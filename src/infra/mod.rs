pub mod http_client;
pub mod json_output_adapter;

pub use http_client::ReqwestHttp;
pub use json_output_adapter::JsonFileOutputAdapter;
