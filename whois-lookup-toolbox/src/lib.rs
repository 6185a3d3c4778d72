//! WHOIS lookup toolbox
//!
//! 通过 APIVerve WHOIS REST API 查询域名注册信息：输入规范化、单次 HTTP 请求、
//! 响应字段映射以及终端报告格式化。所有功能无状态。

mod error;
mod services;
mod types;
mod utils;

pub use error::{ToolboxError, ToolboxResult};
pub use services::{
    WhoisClient, WhoisLookup, format_date, normalize_domain, render_error, render_json,
    render_json_error, render_report,
};
pub use types::{
    ClientConfig, Contact, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, PLACEHOLDER_API_KEY, WhoisResult,
    default_endpoint,
};
