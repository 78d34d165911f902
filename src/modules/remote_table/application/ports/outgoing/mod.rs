pub mod table_client;

pub use table_client::{
    Filter, OrderBy, RemoteTableClient, Row, RowRange, SelectQuery, SelectResult, TableError,
    TableName,
};

#[cfg(test)]
pub use table_client::MockRemoteTableClient;
