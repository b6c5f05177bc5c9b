//! Tests for real/mock routing in the hybrid contract service

mod common;

use common::{demo_token_request, test_config, test_provider, FakeConnection};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use token2022_launchpad::chain::ProgramIdl;
use token2022_launchpad::config::ServiceConfigBuilder;
use token2022_launchpad::config::SimulatedLatency;
use token2022_launchpad::services::{
    HybridContractService, MockContractService, NoDelay, RealContractService, Route, ServiceMode,
};
use token2022_launchpad::types::{AmmPlatform, PoolCreationRequest, PoolType, SwapRequest};
use token2022_launchpad::ContractError;

fn hybrid(connection: Arc<FakeConnection>) -> HybridContractService {
    HybridContractService::new(connection, &test_config(), Arc::new(NoDelay)).unwrap()
}

fn connected_hybrid() -> (HybridContractService, Arc<FakeConnection>) {
    let connection = FakeConnection::new();
    let mut service = hybrid(connection.clone());
    let (provider, _) = test_provider(connection.clone());
    assert_eq!(service.set_provider(provider), ServiceMode::Live);
    (service, connection)
}

fn swap_request() -> SwapRequest {
    SwapRequest {
        from_token_address: "SOL".to_string(),
        to_token_address: "COMP123abc".to_string(),
        from_amount: 12.5,
        slippage: 0.5,
        route: vec!["raydium".to_string()],
    }
}

#[tokio::test]
async fn test_disconnected_service_uses_mock_and_reports_not_ready() {
    let connection = FakeConnection::new();
    let service = hybrid(connection.clone());

    assert_eq!(service.mode(), ServiceMode::Disconnected);
    assert!(!service.is_using_real_service());

    let result = service.create_token(&demo_token_request()).await;
    assert_eq!(result, Err(ContractError::NotReady));
    assert_eq!(connection.calls(), 0);

    let whitelisted = service.is_whitelisted("COMP123abc").await.unwrap();
    assert_eq!(whitelisted.route, Route::Mock);
    assert!(whitelisted.value);
}

#[tokio::test]
async fn test_real_success_is_marked_genuine() {
    let (service, connection) = connected_hybrid();

    let result = service.add_to_whitelist(&Pubkey::new_unique().to_string()).await.unwrap();

    assert_eq!(result.route, Route::Real);
    assert!(result.is_genuine());
    assert_eq!(result.value, connection.sent()[0].signatures[0].to_string());
}

#[tokio::test]
async fn test_single_failure_falls_back_without_demotion() {
    let (service, connection) = connected_hybrid();
    let member = Pubkey::new_unique().to_string();
    connection.fail_next_send(ContractError::Rpc("blockhash not found".to_string()));

    // First call: real path fails, mock answers
    let first = service.add_to_whitelist(&member).await.unwrap();
    assert!(first.is_fallback());
    assert!(first.value.starts_with("whitelist_add_"));
    assert_eq!(
        first.real_error(),
        Some(&ContractError::ExternalRejection {
            operation: "add to whitelist",
            message: "blockhash not found".to_string(),
        })
    );
    assert!(service.is_using_real_service());

    // Second call: real path is attempted again and succeeds
    let second = service.add_to_whitelist(&member).await.unwrap();
    assert_eq!(second.route, Route::Real);
    assert_eq!(connection.sent().len(), 2);
}

#[tokio::test]
async fn test_fallback_masks_rejection_by_default() {
    let (service, connection) = connected_hybrid();
    connection.fail_next_send(ContractError::Rpc("insufficient lamports".to_string()));

    let result = service.create_token(&demo_token_request()).await.unwrap();

    // The caller gets a simulated mint, but can see what it stands in for
    assert!(result.value.transaction_signature.starts_with("mock_signature_"));
    assert!(!result.is_genuine());
    assert!(result.real_error().unwrap().is_external());
}

#[tokio::test]
async fn test_confirmed_mint_is_never_replaced_by_mock() {
    let (service, connection) = connected_hybrid();
    // Mint lands, whitelist account already exists for this authority
    connection.fail_send_at(1, ContractError::Rpc("account already in use".to_string()));

    let result = service.create_token(&demo_token_request()).await;

    let sent = connection.sent();
    assert_eq!(sent.len(), 2);
    match result {
        Err(ContractError::PartialTokenCreation {
            mint_address,
            transaction_signature,
            whitelist_error,
        }) => {
            assert_eq!(mint_address, sent[0].message.account_keys[1].to_string());
            assert_eq!(transaction_signature, sent[0].signatures[0].to_string());
            assert!(whitelist_error.is_external());
        }
        other => panic!("expected partial token creation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rejection_surfaces_when_fallback_disabled() {
    let connection = FakeConnection::new();
    let config = ServiceConfigBuilder::new()
        .with_latency(SimulatedLatency::none())
        .with_fallback_on_rejection(false)
        .build();
    let mut service = HybridContractService::new(connection.clone(), &config, Arc::new(NoDelay)).unwrap();
    let (provider, _) = test_provider(connection.clone());
    service.set_provider(provider);
    connection.fail_next_send(ContractError::Rpc("insufficient lamports".to_string()));

    let result = service.create_token(&demo_token_request()).await;

    assert_eq!(
        result,
        Err(ContractError::ExternalRejection {
            operation: "create token",
            message: "insufficient lamports".to_string(),
        })
    );
}

#[tokio::test]
async fn test_invalid_request_still_falls_back_when_rejections_surface() {
    let connection = FakeConnection::new();
    let config = ServiceConfigBuilder::new()
        .with_latency(SimulatedLatency::none())
        .with_fallback_on_rejection(false)
        .build();
    let mut service = HybridContractService::new(connection.clone(), &config, Arc::new(NoDelay)).unwrap();
    let (provider, _) = test_provider(connection.clone());
    service.set_provider(provider);

    let mut request = demo_token_request();
    request.symbol = "WAYTOOLONGSYMBOL".to_string();
    let result = service.create_token(&request).await.unwrap();

    assert!(matches!(
        result.real_error(),
        Some(ContractError::InvalidRequest(_))
    ));
    assert_eq!(connection.calls(), 0);
}

#[tokio::test]
async fn test_failed_real_binding_keeps_mock_usable() {
    let connection = FakeConnection::new();
    let config = test_config();
    let foreign_idl = ProgramIdl::from_json(
        r#"{
            "address": "11111111111111111111111111111111",
            "metadata": { "name": "other", "version": "0.1.0" },
            "instructions": []
        }"#,
    )
    .unwrap();
    let real =
        RealContractService::with_idl(connection.clone(), &config, foreign_idl, Arc::new(NoDelay)).unwrap();
    let mock = MockContractService::new(&config, Arc::new(NoDelay));
    let mut service = HybridContractService::from_services(real, mock, true);
    let (provider, _) = test_provider(connection.clone());

    let mode = service.set_provider(provider);

    assert_eq!(mode, ServiceMode::Demo);
    assert!(!service.is_using_real_service());

    let swap = service.swap_tokens(&swap_request()).await.unwrap();
    assert_eq!(swap.route, Route::Mock);
    assert!((swap.value.output_amount - 12.5 * 0.98).abs() < 1e-9);
    assert_eq!(connection.calls(), 0);
}

#[tokio::test]
async fn test_stubbed_real_operations_are_labelled() {
    let (service, connection) = connected_hybrid();

    let pool = service
        .create_pool(&PoolCreationRequest {
            token_address: "COMP123abc".to_string(),
            sol_amount: 10.0,
            token_amount: 10_000.0,
            amm_platform: AmmPlatform::Meteora,
            pool_type: PoolType::Cpmm,
            fee_rate: 0.25,
        })
        .await
        .unwrap();
    assert_eq!(pool.route, Route::RealStub);

    let swap = service.swap_tokens(&swap_request()).await.unwrap();
    assert_eq!(swap.route, Route::RealStub);
    assert!((swap.value.output_amount - 12.5 * 0.99).abs() < 1e-9);

    // The placeholder reports everything as whitelisted
    let whitelisted = service.is_whitelisted("TEST456def").await.unwrap();
    assert_eq!(whitelisted.route, Route::RealStub);
    assert!(whitelisted.value);

    assert_eq!(connection.calls(), 0);
}

#[tokio::test]
async fn test_balance_and_history_always_come_from_mock() {
    let (service, _) = connected_hybrid();

    let balance = service.token_balance("COMP123abc", "wallet");
    assert_eq!(balance.route, Route::Mock);
    assert_eq!(balance.value, 1000.0);
    assert_eq!(service.token_balance("Unknown", "wallet").value, 0.0);

    let history = service.transaction_history("wallet").await;
    assert_eq!(history.route, Route::Mock);
    assert!(history.value.is_empty());
}

#[tokio::test]
async fn test_whitelist_initialization_routes() {
    let (service, connection) = connected_hybrid();

    let real = service.initialize_whitelist().await.unwrap();
    assert_eq!(real.route, Route::Real);
    assert!(real.value.whitelist_address.is_some());

    connection.fail_next_send(ContractError::Rpc("account already in use".to_string()));
    let fallback = service.initialize_whitelist().await.unwrap();
    assert!(fallback.is_fallback());
    assert_eq!(fallback.value.whitelist_address, None);
    assert!(fallback.value.transaction_signature.starts_with("whitelist_init_"));
}

#[tokio::test]
async fn test_program_info_matches_between_paths() {
    let connection = FakeConnection::new();
    let disconnected = hybrid(connection.clone());
    let (connected, _) = connected_hybrid();

    assert_eq!(disconnected.program_info(), connected.program_info());
    assert_eq!(connected.program_info().network, "devnet");
}
