//! 历史持久化抽象：core 不关心存在文件、数据库还是别的地方。

/// 会话开始时 `load`，结束时 `save`；顺序为最新的在前。
pub trait HistoryStore {
    type Error: std::error::Error;

    fn load(&self) -> Result<Vec<String>, Self::Error>;

    fn save(&self, entries: &[String]) -> Result<(), Self::Error>;
}
