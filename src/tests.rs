#[cfg(test)]
mod integration_tests {
    use crate::config::StubConfig;
    use crate::schemas::{ApiError, HealthResponse};
    use crate::test_utils::test_utils::{
        ANALYST, MANAGER, SALES, init_test_tracing, login_as, login_with, setup_test_server,
        setup_test_server_with,
    };
    use axum::http::StatusCode;
    use common::{
        ErrorResponse, ForecastResult, HistoryRecord, LoginResponse, Role, UserCreateRequest,
        UserDeleteResponse, UserListResponse, UserRecord, UserUpdateRequest,
    };
    use serde_json::json;
    use wizard::{AbcClass, ForecastModel, GranularityLevel, WizardState, build_payload};

    fn combination_state() -> WizardState {
        let mut state = WizardState::new();
        state.set_model(ForecastModel::Prophet);
        state.set_granularity(GranularityLevel::Combination);
        state.toggle_line("linha_3").unwrap();
        state.toggle_process("processo_2").unwrap();
        state.toggle_class(AbcClass::A);
        state
    }

    fn new_seller() -> UserCreateRequest {
        UserCreateRequest {
            nome: "Bruno Lima".to_string(),
            email: "bruno@demandcast.local".to_string(),
            role: Role::Comercial,
            senha: "segredo1".to_string(),
            ativo: true,
        }
    }

    fn sku_state() -> WizardState {
        let mut state = WizardState::new();
        state.set_horizon(12).unwrap();
        state.set_model(ForecastModel::XGBoost);
        state.set_granularity(GranularityLevel::BySku);
        state.add_sku("PROD123");
        state.add_sku("PROD456");
        state
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = setup_test_server();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.runs_served, 0);
    }

    #[tokio::test]
    async fn test_login_issues_token() {
        let server = setup_test_server();

        let response = server
            .post("/auth/login")
            .json(&json!({ "email": "Analista@DemandCast.local", "senha": "demandcast" }))
            .await;

        response.assert_status_ok();
        let body: LoginResponse = response.json();
        assert!(!body.access_token.is_empty());
        assert_eq!(body.token_type, "bearer");
        assert_eq!(body.expires_in, Some(3600));
        assert_eq!(body.user.role, Role::Analista);
        assert_eq!(body.user.email, ANALYST);
    }

    #[tokio::test]
    async fn test_login_tokens_are_unique() {
        let server = setup_test_server();

        let mut tokens = Vec::new();
        for _ in 0..2 {
            let body: LoginResponse = server
                .post("/auth/login")
                .json(&json!({ "email": ANALYST, "senha": "demandcast" }))
                .await
                .json();
            tokens.push(body.access_token);
        }

        assert_ne!(tokens[0], tokens[1]);
        for token in &tokens {
            let hex = token.strip_prefix("dc.").expect("token prefix");
            assert_eq!(hex.len(), 32);
            assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let server = setup_test_server();

        let response = server
            .post("/auth/login")
            .json(&json!({ "email": MANAGER, "senha": "errada" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = response.json();
        assert_eq!(body.message().as_deref(), Some("E-mail ou senha inválidos"));
    }

    #[tokio::test]
    async fn test_login_validates_body() {
        let server = setup_test_server();

        let response = server
            .post("/auth/login")
            .json(&json!({ "email": "not-an-email", "senha": "" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_predict_requires_token() {
        let server = setup_test_server();
        let payload = build_payload(&WizardState::new()).unwrap();

        let response = server.post("/predict").json(&payload).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: ApiError = response.json();
        assert_eq!(body.detail, "Não autenticado");
    }

    #[tokio::test]
    async fn test_predict_rejects_sales_role() {
        let server = setup_test_server();
        let (name, value) = login_as(&server, SALES).await;
        let payload = build_payload(&WizardState::new()).unwrap();

        let response = server
            .post("/predict")
            .add_header(name, value)
            .json(&payload)
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_predict_accepts_every_wizard_payload() {
        let _tracing = init_test_tracing();
        let server = setup_test_server();
        let (name, value) = login_as(&server, ANALYST).await;

        let cases = [
            (WizardState::new(), "all", 18),
            (combination_state(), "combined", 18),
            (sku_state(), "sku", 12),
        ];

        for (state, kind, periods) in cases {
            let payload = build_payload(&state).unwrap();
            let response = server
                .post("/predict")
                .add_header(name.clone(), value.clone())
                .json(&payload)
                .await;

            response.assert_status_ok();
            let result: ForecastResult = response.json();
            let info = result.aggregation_info.expect("aggregation_info");
            assert_eq!(info.kind.as_deref(), Some(kind));
            assert_eq!(result.preview.map(|p| p.len()), Some(periods));
            assert!(result.run_id.is_some());
            assert!(result.time.is_some());
        }
    }

    #[tokio::test]
    async fn test_predict_manual_model_is_echoed() {
        let server = setup_test_server();
        let (name, value) = login_as(&server, MANAGER).await;

        let response = server
            .post("/predict")
            .add_header(name, value)
            .json(&build_payload(&combination_state()).unwrap())
            .await;

        response.assert_status_ok();
        let result: ForecastResult = response.json();
        assert_eq!(result.model_used.as_deref(), Some("Prophet"));
        assert_eq!(result.auto_selected, Some(false));
        let info = result.aggregation_info.unwrap();
        assert_eq!(info.lines(), vec!["3".to_string()]);
        assert_eq!(info.classes(), vec!["A".to_string()]);
    }

    #[tokio::test]
    async fn test_predict_rejects_empty_combination() {
        let server = setup_test_server();
        let (name, value) = login_as(&server, ANALYST).await;

        let response = server
            .post("/predict")
            .add_header(name, value)
            .json(&json!({
                "periods": 18,
                "preview_rows": 18,
                "model": "auto",
                "aggregation_type": "combined",
                "familia": null,
                "processo": null,
                "abc_class": null
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: ErrorResponse = response.json();
        assert_eq!(
            body.message().as_deref(),
            Some("Informe ao menos uma linha, processo ou classe ABC")
        );
    }

    #[tokio::test]
    async fn test_predict_malformed_body_reports_detail() {
        let server = setup_test_server();
        let (name, value) = login_as(&server, ANALYST).await;

        for body in [
            json!({ "aggregation_type": "bogus" }),
            json!({ "preview_rows": 12, "model": "auto", "aggregation_type": "all" }),
            json!({ "periods": "doze", "preview_rows": 12, "model": "auto", "aggregation_type": "all" }),
        ] {
            let response = server
                .post("/predict")
                .add_header(name.clone(), value.clone())
                .json(&body)
                .await;

            response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
            let error: ErrorResponse = response.json();
            assert!(error.message().is_some_and(|m| !m.is_empty()));
        }
    }

    #[tokio::test]
    async fn test_predict_rejects_zero_horizon() {
        let server = setup_test_server();
        let (name, value) = login_as(&server, ANALYST).await;

        let response = server
            .post("/predict")
            .add_header(name, value)
            .json(&json!({
                "periods": 0,
                "preview_rows": 0,
                "model": "auto",
                "aggregation_type": "all"
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_history_lists_runs_most_recent_first() {
        let server = setup_test_server();
        let (name, value) = login_as(&server, ANALYST).await;

        for state in [WizardState::new(), sku_state()] {
            server
                .post("/predict")
                .add_header(name.clone(), value.clone())
                .json(&build_payload(&state).unwrap())
                .await
                .assert_status_ok();
        }

        let response = server
            .get("/previsoes")
            .add_header(name.clone(), value.clone())
            .await;
        response.assert_status_ok();
        let runs: Vec<HistoryRecord> = response.json();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].id_previsao, "run-000002");
        assert_eq!(runs[0].details(), "PROD123");
        assert_eq!(runs[1].details(), "Agregado");
        assert!(runs[0].processed_at().is_some());

        let limited = server
            .get("/previsoes")
            .add_query_param("limit", 1)
            .add_header(name, value)
            .await;
        limited.assert_status_ok();
        let runs: Vec<HistoryRecord> = limited.json();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].id_previsao, "run-000002");

        let health: HealthResponse = server.get("/health").await.json();
        assert_eq!(health.runs_served, 2);
    }

    #[tokio::test]
    async fn test_history_requires_token() {
        let server = setup_test_server();

        let response = server.get("/previsoes").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_history_keeps_most_recent_runs_when_full() {
        let config = StubConfig::new(3600, 2, "demandcast".to_string()).unwrap();
        let server = setup_test_server_with(&config);
        let (name, value) = login_as(&server, ANALYST).await;

        for _ in 0..6 {
            server
                .post("/predict")
                .add_header(name.clone(), value.clone())
                .json(&build_payload(&WizardState::new()).unwrap())
                .await
                .assert_status_ok();
        }

        let runs: Vec<HistoryRecord> = server.get("/previsoes").add_header(name, value).await.json();
        let ids: Vec<&str> = runs.iter().map(|run| run.id_previsao.as_str()).collect();
        assert_eq!(ids, vec!["run-000006", "run-000005"]);
    }

    #[tokio::test]
    async fn test_users_require_manager_role() {
        let server = setup_test_server();

        server.get("/usuarios").await.assert_status(StatusCode::UNAUTHORIZED);

        let (name, value) = login_as(&server, ANALYST).await;
        let response = server.get("/usuarios").add_header(name, value).await;
        response.assert_status(StatusCode::FORBIDDEN);

        let (name, value) = login_as(&server, MANAGER).await;
        let response = server.get("/usuarios").add_header(name, value).await;
        response.assert_status_ok();
        let list: UserListResponse = response.json();
        assert_eq!(list.total, 3);
        assert_eq!(list.usuarios[0].email, MANAGER);
    }

    #[tokio::test]
    async fn test_created_user_can_log_in() {
        let server = setup_test_server();
        let (name, value) = login_as(&server, MANAGER).await;

        let response = server
            .post("/usuarios")
            .add_header(name.clone(), value.clone())
            .json(&new_seller())
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: UserRecord = response.json();
        assert_eq!(created.role, Role::Comercial);
        assert_eq!(created.ativo, Some(true));

        let (seller, token) = login_with(&server, "bruno@demandcast.local", "segredo1").await;
        server
            .get("/previsoes")
            .add_header(seller, token)
            .await
            .assert_status_ok();

        let duplicate = server
            .post("/usuarios")
            .add_header(name.clone(), value.clone())
            .json(&new_seller())
            .await;
        duplicate.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = duplicate.json();
        assert_eq!(
            body.message().as_deref(),
            Some("Usuário com o e-mail bruno@demandcast.local já existe")
        );

        let id = created.id_usuario.unwrap();
        let fetched: UserRecord = server
            .get(&format!("/usuarios/{}", id))
            .add_header(name, value)
            .await
            .json();
        assert_eq!(fetched.email, "bruno@demandcast.local");
    }

    #[tokio::test]
    async fn test_create_user_validates_body() {
        let server = setup_test_server();
        let (name, value) = login_as(&server, MANAGER).await;

        let short_password = UserCreateRequest { senha: "123".to_string(), ..new_seller() };
        server
            .post("/usuarios")
            .add_header(name.clone(), value.clone())
            .json(&short_password)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let unknown_role = json!({
            "nome": "Bruno Lima",
            "email": "bruno@demandcast.local",
            "role": "estagiario",
            "senha": "segredo1"
        });
        let response = server
            .post("/usuarios")
            .add_header(name, value)
            .json(&unknown_role)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(body.message().is_some_and(|m| m.starts_with("Perfil inválido")));
    }

    #[tokio::test]
    async fn test_role_change_applies_to_live_session() {
        let server = setup_test_server();
        let (manager, manager_token) = login_as(&server, MANAGER).await;
        let (sales, sales_token) = login_as(&server, SALES).await;
        let payload = build_payload(&WizardState::new()).unwrap();

        server
            .post("/predict")
            .add_header(sales.clone(), sales_token.clone())
            .json(&payload)
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let promotion = UserUpdateRequest { role: Some(Role::Analista), ..UserUpdateRequest::default() };
        let updated: UserRecord = server
            .put("/usuarios/u-3")
            .add_header(manager, manager_token)
            .json(&promotion)
            .await
            .json();
        assert_eq!(updated.role, Role::Analista);
        assert_eq!(updated.email, SALES);

        server
            .post("/predict")
            .add_header(sales, sales_token)
            .json(&payload)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_deactivated_user_loses_access() {
        let server = setup_test_server();
        let (manager, manager_token) = login_as(&server, MANAGER).await;
        let (sales, sales_token) = login_as(&server, SALES).await;

        let response = server
            .delete("/usuarios/u-3")
            .add_header(manager.clone(), manager_token.clone())
            .await;
        response.assert_status_ok();
        let body: UserDeleteResponse = response.json();
        assert_eq!(body.usuario_id, "u-3");

        server
            .get("/previsoes")
            .add_header(sales, sales_token)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let login = server
            .post("/auth/login")
            .json(&json!({ "email": SALES, "senha": "demandcast" }))
            .await;
        login.assert_status(StatusCode::UNAUTHORIZED);
        let error: ErrorResponse = login.json();
        assert!(error.message().is_some_and(|m| m.starts_with("Usuário desativado")));

        let active: UserListResponse = server
            .get("/usuarios")
            .add_header(manager.clone(), manager_token.clone())
            .await
            .json();
        assert_eq!(active.total, 2);

        let everyone: UserListResponse = server
            .get("/usuarios")
            .add_query_param("include_inactive", true)
            .add_header(manager.clone(), manager_token.clone())
            .await
            .json();
        assert_eq!(everyone.total, 3);

        server
            .delete("/usuarios/u-1")
            .add_header(manager.clone(), manager_token.clone())
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .delete("/usuarios/u-9")
            .add_header(manager, manager_token)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
