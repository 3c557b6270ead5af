#![allow(dead_code)]

use async_trait::async_trait;
use connectors::{
    adapter::Adapter,
    driver::{ParamDriver, Row, RowCursor, TextDriver, VecCursor},
    encoding::TextCodec,
    error::{EncodingError, ExecutionError},
    source::DataSource,
};
use engine_core::{session::Session, settings::SessionSettings};
use model::core::value::Value;
use planner::{
    query::dialect::{DbaseOdbc, FoxProOleDb},
    schema::{
        decl::TableDecl,
        registry::SchemaRegistry,
        standard::{self, JOURNAL, RA, RG, SC},
    },
};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

pub mod integration;
pub mod utils;

/// What a scripted driver was asked to run.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub sql: String,
    pub params: Vec<Value>,
}

/// An in-memory driver that answers with queued results and records
/// every call. With nothing queued it returns no rows.
#[derive(Default)]
pub struct ScriptedDriver {
    responses: Mutex<VecDeque<Result<Vec<Row>, ExecutionError>>>,
    calls: Mutex<Vec<Call>>,
    delay: Option<Duration>,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push_rows(&self, rows: Vec<Row>) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(rows));
        self
    }

    pub fn push_error(&self, error: ExecutionError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<Call> {
        self.calls.lock().unwrap().last().cloned()
    }

    async fn answer(&self, sql: &str, params: &[Value]) -> Result<Box<dyn RowCursor>, ExecutionError> {
        self.calls.lock().unwrap().push(Call {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.responses.lock().unwrap().pop_front();
        let rows = next.unwrap_or_else(|| Ok(Vec::new()))?;
        Ok(Box::new(VecCursor::new(rows)))
    }
}

#[async_trait]
impl ParamDriver for ScriptedDriver {
    async fn connect(_source: &DataSource) -> Result<Self, ExecutionError> {
        Ok(ScriptedDriver::new())
    }

    async fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Box<dyn RowCursor>, ExecutionError> {
        self.answer(sql, params).await
    }
}

#[async_trait]
impl TextDriver for ScriptedDriver {
    async fn connect(_source: &DataSource) -> Result<Self, ExecutionError> {
        Ok(ScriptedDriver::new())
    }

    async fn execute(&self, sql: &str) -> Result<Box<dyn RowCursor>, ExecutionError> {
        self.answer(sql, &[]).await
    }
}

/// A codec that cannot decode the replacement character, standing in for
/// a legacy code page that meets bytes it has no mapping for.
pub struct StrictCodec;

impl TextCodec for StrictCodec {
    fn charset(&self) -> &str {
        "cp866"
    }

    fn encode(&self, text: &str) -> Result<String, EncodingError> {
        Ok(text.to_string())
    }

    fn decode(&self, text: &str) -> Result<String, EncodingError> {
        match text.find('\u{fffd}') {
            Some(at) => Err(EncodingError::Malformed {
                charset: self.charset().into(),
                detail: format!("undecodable byte at {at}"),
            }),
            None => Ok(text.to_string()),
        }
    }
}

/// The standard families plus a small trade database: stocks, items,
/// managers, clients, a stock balance register and its movements, and a
/// client credit register.
pub fn demo_registry() -> Arc<SchemaRegistry> {
    let mut builder = SchemaRegistry::builder();
    standard::register(&mut builder).unwrap();
    builder
        .table(TableDecl::derive("Stocks", SC).index(135))
        .unwrap()
        .table(TableDecl::derive("Items", SC).index(156))
        .unwrap()
        .table(TableDecl::derive("Manager", SC).index(208))
        .unwrap()
        .table(TableDecl::derive("Clients", SC).index(133).field_joined(
            "manager", "SP55407", "Manager", "id",
        ))
        .unwrap()
        .table(
            TableDecl::derive("Lefts", RG)
                .index(55503)
                .field_joined("stock", "SP55613", "Stocks", "id")
                .field_joined("item", "SP55504", "Items", "id")
                .field("count", "SP55506"),
        )
        .unwrap()
        .table(
            TableDecl::derive("LeftsMotion", RA)
                .index(55503)
                .field_joined("stock", "SP55613", "Stocks", "id")
                .field_joined("item", "SP55504", "Items", "id")
                .field("count", "SP55506"),
        )
        .unwrap()
        .table(
            TableDecl::derive("Credit", RG)
                .index(55413)
                .field_joined("client", "SP55414", "Clients", "id")
                .field_joined("doc", "SP55415", JOURNAL, "doc")
                .field("price", "SP55416")
                .field("invoice", "SP55427")
                .field("diff", "SP55439"),
        )
        .unwrap();
    Arc::new(builder.freeze().unwrap())
}

/// A session over the dBASE ODBC dialect with bound parameters.
pub fn odbc_session(settings: SessionSettings) -> (Session, Arc<ScriptedDriver>) {
    let driver = Arc::new(ScriptedDriver::new());
    let adapter = Adapter::bound(driver.clone(), Arc::new(DbaseOdbc));
    (Session::new(adapter, demo_registry(), settings), driver)
}

/// A session over the FoxPro OLE DB dialect, parameters inlined as literals.
pub fn oledb_session(settings: SessionSettings) -> (Session, Arc<ScriptedDriver>) {
    let driver = Arc::new(ScriptedDriver::new());
    let adapter = Adapter::inline(driver.clone(), Arc::new(FoxProOleDb));
    (Session::new(adapter, demo_registry(), settings), driver)
}

/// An ODBC session whose engine decodes rows through [`StrictCodec`].
pub fn strict_session(settings: SessionSettings) -> (Session, Arc<ScriptedDriver>) {
    let driver = Arc::new(ScriptedDriver::new());
    let adapter =
        Adapter::bound(driver.clone(), Arc::new(DbaseOdbc)).with_codec(Arc::new(StrictCodec));
    (Session::new(adapter, demo_registry(), settings), driver)
}
