#[cfg(test)]
mod tests {
    use crate::{
        ScriptedDriver, demo_registry, odbc_session, oledb_session, strict_session,
        utils::{balance_date, column_by_key, record_names, row, text},
    };
    use bigdecimal::BigDecimal;
    use connectors::{
        adapter::Adapter,
        error::{EncodingError, ExecutionError},
    };
    use engine_config::{env::EnvManager, settings::EngineConfig};
    use engine_core::{
        error::QueryError,
        options::ExecOptions,
        session::Session,
        settings::{FailurePolicy, SessionSettings},
    };
    use model::core::{identifiers, value::Value};
    use planner::{
        error::QueryBuildError,
        expr::{CompareOp, any_of},
        query::{ast::select::Projection, dialect::DbaseOdbc, renderer::InListStyle},
        schema::standard::JOURNAL,
    };
    use std::{str::FromStr, sync::Arc, time::Duration};
    use tokio_util::sync::CancellationToken;
    use tracing_test::traced_test;

    // Scenario: clients with the name of their manager, joined through the
    // manager field's declared target.
    // Expected Outcome: one left outer join, no parameters, records keyed by alias.
    #[traced_test]
    #[tokio::test]
    async fn tc01_clients_with_manager() {
        let (session, driver) = odbc_session(SessionSettings::default());
        let clients = session.registry().table("Clients").unwrap();
        let manager = session.registry().table("Manager").unwrap();

        driver.push_rows(vec![
            row(["0001", "Vector LLC", "Ivanov"]),
            row(["0002", "Orbita", "Petrov"]),
        ]);

        let records = session
            .select(clients)
            .select([
                clients.field("code").unwrap().alias("code"),
                clients.field("description").unwrap().alias("title"),
                manager.field("description").unwrap().alias("manager"),
            ])
            .extend(clients.field("manager").unwrap())
            .all()
            .await
            .unwrap();

        let call = driver.last_call().unwrap();
        assert_eq!(
            call.sql,
            "SELECT SC133.CODE,SC133.DESCR,SC208.DESCR FROM \
             (SC133 LEFT OUTER JOIN SC208 ON SC208.ID = SC133.SP55407)"
        );
        assert!(call.params.is_empty());

        assert_eq!(records.len(), 2);
        assert_eq!(record_names(&records[0]), ["code", "title", "manager"]);
        assert_eq!(records[1].get("manager"), Some(&Value::from("Petrov")));
    }

    // Scenario: stock balances on one date for the main stock, two extends
    // and two filters.
    // Expected Outcome: left-associated join tree, parameters in filter order.
    #[traced_test]
    #[tokio::test]
    async fn tc02_balances_for_date() {
        let (session, driver) = odbc_session(SessionSettings::default());
        let registry = session.registry();
        let lefts = registry.table("Lefts").unwrap();
        let items = registry.table("Items").unwrap();
        let stocks = registry.table("Stocks").unwrap();

        driver.push_rows(vec![vec![Value::from("K001 "), Value::from("90,5")]]);

        let records = session
            .select(lefts)
            .select([
                items.field("code").unwrap().alias("code"),
                lefts.field("count").unwrap().alias("count"),
            ])
            .extend(lefts.field("stock").unwrap())
            .extend(lefts.field("item").unwrap())
            .filter(lefts.field("period").unwrap().equals(balance_date()))
            .filter(stocks.field("description").unwrap().equals("Main"))
            .all()
            .await
            .unwrap();

        let call = driver.last_call().unwrap();
        assert_eq!(
            call.sql,
            "SELECT SC156.CODE,RG55503.SP55506 FROM \
             ((RG55503 LEFT OUTER JOIN SC135 ON SC135.ID = RG55503.SP55613) \
             LEFT OUTER JOIN SC156 ON SC156.ID = RG55503.SP55504) \
             WHERE RG55503.PERIOD = ? AND SC135.DESCR = ?"
        );
        assert_eq!(call.params, vec![Value::Date(balance_date()), Value::from("Main")]);

        assert_eq!(text(&records[0], "code"), "K001");
        assert_eq!(records[0].float("count").unwrap(), 90.5);
        assert_eq!(
            records[0].decimal("count").unwrap(),
            BigDecimal::from_str("90.5").unwrap()
        );
    }

    // Scenario: filters on NULL, an OR group and a field-to-field comparison.
    // Expected Outcome: NULL comparisons bind nothing; the field operand binds
    // its qualified name.
    #[traced_test]
    #[tokio::test]
    async fn tc03_null_and_grouped_filters() {
        let (session, driver) = odbc_session(SessionSettings::default());
        let clients = session.registry().table("Clients").unwrap();
        let code = clients.field("code").unwrap();
        let manager = clients.field("manager").unwrap();

        session
            .select(clients)
            .select([code])
            .filter(manager.is_null())
            .filter(any_of([code.equals("0001"), code.greater_or_equal("0100")]))
            .filter(code.compare_field(CompareOp::NotEq, clients.field("description").unwrap()))
            .all()
            .await
            .unwrap();

        let call = driver.last_call().unwrap();
        assert_eq!(
            call.sql,
            "SELECT SC133.CODE FROM SC133 WHERE SC133.SP55407 IS NULL \
             AND (SC133.CODE = ? OR SC133.CODE >= ?) AND SC133.CODE <> ?"
        );
        assert_eq!(
            call.params,
            vec![Value::from("0001"), Value::from("0100"), Value::from("SC133.DESCR")]
        );
    }

    // Scenario: membership filters with the default and the inline list style.
    // Expected Outcome: bound placeholders by default; quoted literals when inline.
    #[traced_test]
    #[tokio::test]
    async fn tc04_in_list_styles() {
        let (session, driver) = odbc_session(SessionSettings::default());
        let items = session.registry().table("Items").unwrap();
        let code = items.field("code").unwrap();

        session
            .select(items)
            .select([code])
            .filter(code.is_in(["A", "B"]))
            .all()
            .await
            .unwrap();
        let call = driver.last_call().unwrap();
        assert_eq!(call.sql, "SELECT SC156.CODE FROM SC156 WHERE SC156.CODE IN (?,?)");
        assert_eq!(call.params, vec![Value::from("A"), Value::from("B")]);

        let (session, driver) =
            odbc_session(SessionSettings::default().with_in_lists(InListStyle::Inline));
        let items = session.registry().table("Items").unwrap();
        let query = session
            .select(items)
            .select([items.field("code").unwrap()])
            .filter(items.field("code").unwrap().is_in(["A", "B"]))
            .filter(items.field("id").unwrap().is_in([1, 2]));
        query.all().await.unwrap();

        let call = driver.last_call().unwrap();
        assert_eq!(
            call.sql,
            "SELECT SC156.CODE FROM SC156 WHERE SC156.CODE IN ('A','B') AND SC156.ID IN (1,2)"
        );
        assert!(call.params.is_empty());

        let err = session
            .select(items)
            .select([items.field("code").unwrap()])
            .filter(items.field("code").unwrap().is_in(Vec::<Value>::new()))
            .all()
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::Build(QueryBuildError::EmptyInList(_))));
    }

    // Scenario: the OLE DB driver cannot bind, so parameters become literals.
    // Expected Outcome: the driver receives finished SQL in FoxPro date syntax.
    #[traced_test]
    #[tokio::test]
    async fn tc05_inline_literals_for_oledb() {
        let (session, driver) = oledb_session(SessionSettings::default());
        let registry = session.registry();
        let credit = registry.table("Credit").unwrap();
        let journal = registry.table(JOURNAL).unwrap();
        let clients = registry.table("Clients").unwrap();

        driver.push_rows(vec![vec![
            Value::from("O'Brien"),
            Value::from("   1A2B3C"),
            Value::from("1500,25"),
        ]]);

        let records = session
            .select(credit)
            .select([
                clients.field("description").unwrap().alias("client"),
                journal.field("doc").unwrap().alias("doc"),
                credit.field("price").unwrap().alias("price"),
            ])
            .extend(credit.field("client").unwrap())
            .extend(credit.field("doc").unwrap())
            .filter(credit.field("period").unwrap().less_or_equal(balance_date()))
            .filter(clients.field("description").unwrap().not_equals("O'Brien"))
            .all()
            .await
            .unwrap();

        let call = driver.last_call().unwrap();
        assert_eq!(
            call.sql,
            "SELECT SC133.DESCR,Journal.IDDOC,RG55413.SP55416 FROM \
             ((RG55413 LEFT OUTER JOIN SC133 ON SC133.ID = RG55413.SP55414) \
             LEFT OUTER JOIN 1SJOURN AS Journal ON Journal.IDDOC = RG55413.SP55415) \
             WHERE RG55413.PERIOD <= {^2024-05-01} AND SC133.DESCR <> 'O''Brien'"
        );
        assert!(call.params.is_empty());

        let doc = records[0].strip("doc").unwrap().to_string();
        assert_eq!(identifiers::doc_id(&doc), "3C");
        assert_eq!(
            identifiers::doc_index(&doc).unwrap(),
            identifiers::base36_decode("1A2B").unwrap()
        );
        assert_eq!(
            records[0].decimal("price").unwrap(),
            BigDecimal::from_str("1500.25").unwrap()
        );
    }

    // Scenario: terminal calls against an empty result.
    // Expected Outcome: `all` is empty, `one` reports NotFound with the SQL text.
    #[traced_test]
    #[tokio::test]
    async fn tc06_empty_results() {
        let (session, _driver) = odbc_session(SessionSettings::default());
        let query = session
            .table("Stocks")
            .unwrap()
            .select([session.registry().field("Stocks", "code").unwrap()]);

        assert!(query.all().await.unwrap().is_empty());
        match query.one().await {
            Err(QueryError::NotFound(sql)) => assert_eq!(sql, "SELECT SC135.CODE FROM SC135"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    // Scenario: the driver fails under the default policy.
    // Expected Outcome: empty result, logged error, diagnostics entry with SQL
    // and parameters; `one` still reports the failure.
    #[traced_test]
    #[tokio::test]
    async fn tc07_failure_degrades_to_empty() {
        let (session, driver) = odbc_session(SessionSettings::default());
        let items = session.registry().table("Items").unwrap();
        let query = session
            .select(items)
            .select([items])
            .filter(items.field("code").unwrap().equals("X"));

        driver.push_error(ExecutionError::Driver("file SC156.DBF is locked".into()));
        assert!(query.all().await.unwrap().is_empty());
        assert!(logs_contain("Query failed, returning no rows"));

        let failures = session.diagnostics().failures().await;
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0].sql,
            "SELECT SC156.ID,SC156.CODE,SC156.DESCR FROM SC156 WHERE SC156.CODE = ?"
        );
        assert_eq!(failures[0].params, vec![Value::from("X")]);
        assert!(failures[0].error.contains("locked"));

        driver.push_error(ExecutionError::Driver("file SC156.DBF is locked".into()));
        assert!(matches!(
            query.one().await,
            Err(QueryError::Execution(ExecutionError::Driver(_)))
        ));
        assert_eq!(session.diagnostics().len().await, 1);
    }

    // Scenario: the caller opts into propagating execution failures.
    // Expected Outcome: the driver error comes back and nothing is recorded.
    #[traced_test]
    #[tokio::test]
    async fn tc08_failure_propagates_when_configured() {
        let (session, driver) = odbc_session(
            SessionSettings::default().with_failure_policy(FailurePolicy::Propagate),
        );
        let items = session.registry().table("Items").unwrap();

        driver.push_error(ExecutionError::Driver("syntax error".into()));
        let err = session.select(items).select([items]).all().await.unwrap_err();
        assert!(matches!(
            err,
            QueryError::Execution(ExecutionError::Driver(msg)) if msg == "syntax error"
        ));
        assert!(session.diagnostics().is_empty().await);
    }

    // Scenario: keyed results over the raw stored value of a projected field.
    // Expected Outcome: aliased key works, later rows win, transformed or
    // missing keys are rejected before execution.
    #[traced_test]
    #[tokio::test]
    async fn tc09_dict_by_raw_key() {
        let (session, driver) = odbc_session(SessionSettings::default());
        let items = session.registry().table("Items").unwrap();
        let id = items.field("id").unwrap();
        let code = items.field("code").unwrap();

        driver.push_rows(vec![
            vec![Value::from("  1"), Value::from("A")],
            vec![Value::from("  2"), Value::from("B")],
            vec![Value::from("  1"), Value::from("C")],
        ]);

        let query = session
            .select(items)
            .select([id.alias("key"), code.alias("code")]);
        let by_id = query.dict(id).await.unwrap();

        let codes = column_by_key(&by_id, "code");
        assert_eq!(codes.len(), 2);
        assert_eq!(codes[&Value::from("  1")], Value::from("C"));
        assert_eq!(codes[&Value::from("  2")], Value::from("B"));

        let calls = driver.calls().len();
        let transformed = session.select(items).select([code.right(2)]);
        assert!(matches!(
            transformed.dict(code).await,
            Err(QueryError::Build(QueryBuildError::KeyNotProjected(_)))
        ));
        assert!(matches!(
            query.dict(items.field("description").unwrap()).await,
            Err(QueryError::Build(QueryBuildError::KeyNotProjected(_)))
        ));
        assert_eq!(driver.calls().len(), calls);
    }

    // Scenario: a hanging driver with a per-call timeout.
    // Expected Outcome: degraded to empty under the default policy, an error
    // under propagate; a warning is logged either way.
    #[traced_test]
    #[tokio::test]
    async fn tc10_timeout() {
        let driver = Arc::new(ScriptedDriver::new().with_delay(Duration::from_secs(5)));
        let adapter = Adapter::bound(driver, Arc::new(DbaseOdbc));
        let session = Session::new(adapter, demo_registry(), SessionSettings::default());
        let stocks = session.registry().table("Stocks").unwrap();
        let options = ExecOptions::new().with_timeout(Duration::from_millis(20));

        let query = session.select(stocks).select([stocks]);
        assert!(query.all_with(&options).await.unwrap().is_empty());
        assert!(logs_contain("timed out"));

        let failures = session.diagnostics().failures().await;
        assert_eq!(failures.len(), 1);
        assert!(failures[0].error.contains("timed out"));

        assert!(matches!(
            query.one_with(&options).await,
            Err(QueryError::Execution(ExecutionError::Timeout(_)))
        ));
    }

    // Scenario: the caller cancels before the driver answers.
    // Expected Outcome: cancellation is returned even under the degrade policy.
    #[traced_test]
    #[tokio::test]
    async fn tc11_cancellation_always_propagates() {
        let driver = Arc::new(ScriptedDriver::new().with_delay(Duration::from_secs(5)));
        let adapter = Adapter::bound(driver, Arc::new(DbaseOdbc));
        let session = Session::new(adapter, demo_registry(), SessionSettings::default());
        let stocks = session.registry().table("Stocks").unwrap();

        let cancel = CancellationToken::new();
        let options = ExecOptions::new().with_cancel(cancel.clone());
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel.cancel();
        });

        let result = session.select(stocks).select([stocks]).all_with(&options).await;
        canceller.await.unwrap();

        assert!(matches!(
            result,
            Err(QueryError::Execution(ExecutionError::Cancelled))
        ));
        assert!(session.diagnostics().is_empty().await);
    }

    // Scenario: the driver returns rows narrower than the projection.
    // Expected Outcome: a row arity failure, subject to the failure policy.
    #[traced_test]
    #[tokio::test]
    async fn tc12_row_arity() {
        let (session, driver) = odbc_session(
            SessionSettings::default().with_failure_policy(FailurePolicy::Propagate),
        );
        let stocks = session.registry().table("Stocks").unwrap();

        driver.push_rows(vec![row(["1", "Main"])]);
        let err = session.select(stocks).select([stocks]).all().await.unwrap_err();
        assert!(matches!(
            err,
            QueryError::Execution(ExecutionError::RowArity {
                expected: 3,
                found: 2
            })
        ));
    }

    // Scenario: tables derived from one family, with aliases and transforms
    // applied to one of them.
    // Expected Outcome: the other table's fields and the registry are untouched.
    #[traced_test]
    #[tokio::test]
    async fn tc13_family_fields_are_independent() {
        let (session, driver) = odbc_session(SessionSettings::default());
        let registry = session.registry();
        let items = registry.table("Items").unwrap();
        let stocks = registry.table("Stocks").unwrap();

        let tail = items.field("code").unwrap().right(3).alias("tail");
        assert_eq!(tail.display_name(), "tail");
        assert_eq!(items.field("code").unwrap().display_name(), "Items.code");
        assert_eq!(stocks.field("code").unwrap().qualified_name(), "SC135.CODE");

        session
            .select(items)
            .select([Projection::from(tail), Projection::from(stocks.field("code").unwrap())])
            .inner(stocks.field("id").unwrap(), items.field("id").unwrap())
            .all()
            .await
            .unwrap();
        assert_eq!(
            driver.last_call().unwrap().sql,
            "SELECT RIGHT(SC156.CODE, 3),SC135.CODE FROM \
             (SC156 INNER JOIN SC135 ON SC135.ID = SC156.ID)"
        );
    }

    // Scenario: one query handle run twice.
    // Expected Outcome: identical SQL and parameters, two driver calls.
    #[traced_test]
    #[tokio::test]
    async fn tc14_rerun_renders_identically() {
        let (session, driver) = odbc_session(SessionSettings::default());
        let motion = session.registry().table("LeftsMotion").unwrap();
        let journal = session.registry().table(JOURNAL).unwrap();

        let query = session
            .select(motion)
            .select([motion.field("count").unwrap(), journal.field("date").unwrap()])
            .inner(journal.field("doc").unwrap(), motion.field("doc").unwrap())
            .filter(motion.field("count").unwrap().greater_than(0));

        let rendered = query.render().unwrap();
        query.all().await.unwrap();
        query.all().await.unwrap();

        let calls = driver.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
        assert_eq!(calls[0].sql, rendered.sql);
        assert_eq!(
            rendered.sql,
            "SELECT RA55503.SP55506,Journal.DATE FROM \
             (RA55503 INNER JOIN 1SJOURN AS Journal ON Journal.IDDOC = RA55503.IDDOC) \
             WHERE RA55503.SP55506 > ?"
        );
    }

    // Scenario: a session assembled from environment configuration.
    // Expected Outcome: configured dialect, policy and list style are honoured.
    #[traced_test]
    #[tokio::test]
    async fn tc15_session_from_config() {
        let mut env = EnvManager::empty();
        env.parse_env_content(
            "DBQ_DATA_SOURCE=/srv/trade\nDBQ_DIALECT=foxpro-oledb\nDBQ_FAILURE_POLICY=propagate\nDBQ_IN_LISTS=inline",
        )
        .unwrap();
        let config = EngineConfig::from_env(&env).unwrap();

        let adapter =
            Adapter::connect_inline::<ScriptedDriver>(&config.data_source(), config.dialect())
                .await
                .unwrap();
        let session = Session::new(adapter, demo_registry(), config.session_settings());
        assert_eq!(session.settings().failure_policy, FailurePolicy::Propagate);

        let items = session.registry().table("Items").unwrap();
        let rendered = session
            .select(items)
            .select([items.field("code").unwrap()])
            .filter(items.field("code").unwrap().is_in(["A"]))
            .filter(items.field("id").unwrap().equals(7))
            .render()
            .unwrap();
        assert_eq!(
            rendered.sql,
            "SELECT SC156.CODE FROM SC156 WHERE SC156.CODE IN ('A') AND SC156.ID = ?"
        );
        assert_eq!(rendered.params, vec![Value::Int(7)]);
        assert_eq!(serde_json::to_value(&rendered.params).unwrap().as_array().unwrap().len(), 1);
    }

    // Scenario: a row comes back with text the code page cannot decode.
    // Expected Outcome: an empty result plus a diagnostics entry by default;
    // the encoding error itself under propagate.
    #[traced_test]
    #[tokio::test]
    async fn tc16_undecodable_text() {
        let (session, driver) = strict_session(SessionSettings::default());
        let items = session.registry().table("Items").unwrap();
        let code = items.field("code").unwrap();

        driver.push_rows(vec![row(["K001"]), row(["K\u{fffd}02"])]);
        let records = session.select(items).select([code]).all().await.unwrap();
        assert!(records.is_empty());
        assert!(logs_contain("Query failed, returning no rows"));

        let failures = session.diagnostics().failures().await;
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].sql, "SELECT SC156.CODE FROM SC156");
        assert!(failures[0].error.contains("cp866"));

        let (session, driver) = strict_session(
            SessionSettings::default().with_failure_policy(FailurePolicy::Propagate),
        );
        let items = session.registry().table("Items").unwrap();
        let code = items.field("code").unwrap();

        driver.push_rows(vec![row(["K\u{fffd}02"])]);
        let err = session.select(items).select([code]).all().await.unwrap_err();
        assert!(matches!(
            err,
            QueryError::Execution(ExecutionError::Encoding(EncodingError::Malformed { detail, .. }))
                if detail == "undecodable byte at 1"
        ));
        assert!(session.diagnostics().is_empty().await);

        driver.push_rows(vec![row(["K001"])]);
        let records = session.select(items).select([code]).all().await.unwrap();
        assert_eq!(text(&records[0], "Items.code"), "K001");
    }
}
