//! `mangonel_core`：启动器的纯逻辑层，不做任何 I/O。
//!
//! 设计目标：
//! - **核心可复用**：CLI/GUI 都能复用同一套逻辑
//! - **分层清晰**：session -> processor -> provider 查询 -> ranked 合并 -> carousel 选择 -> 输出（`DisplayState`）
//! - **外部协作方只走接口**：provider 的实现、历史的持久化都在别的 crate 里
pub mod context;
pub mod error;
pub mod history_store;
pub mod key_event;
pub mod model;
pub mod processor;
pub mod provider;
pub mod query;
pub mod ranked;
pub mod selection;
pub mod session;

pub use error::{ProviderError, RegistryError};
pub use model::{Candidate, DisplayState, ProviderId, UNRANKED};
pub use provider::{Provider, ProviderRegistry};
pub use session::{Session, SessionConfig};
