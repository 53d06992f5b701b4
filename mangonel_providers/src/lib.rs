//! 具体的 provider 实现：应用目录、文件路径、shell 命令。
//!
//! 每个 provider 自己控制查询规模（每次按键都会同步调用）。

pub mod applications;
mod launch;
pub mod paths;
pub mod shell;

pub use applications::{AppEntry, ApplicationsProvider};
pub use paths::{PathsConfig, PathsProvider};
pub use shell::{ShellConfig, ShellProvider};
