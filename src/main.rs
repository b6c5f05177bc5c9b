//! Main entry point for the token2022-launchpad demo
//!
//! Checks that the deployed program is reachable, attaches a wallet when a
//! keypair file is configured, and runs the token, pool and trading workflows
//! through the hybrid contract service.

use anyhow::{anyhow, Context, Result};
use solana_sdk::signature::read_keypair_file;
use std::sync::Arc;
use token2022_launchpad::chain::KeypairWallet;
use token2022_launchpad::diagnostics::check_program_deployment;
use token2022_launchpad::quote;
use token2022_launchpad::types::{AmmPlatform, PoolType};
use token2022_launchpad::{
    AppContext, PoolCreationRequest, Route, ServiceConfig, ServiceMode, SwapRequest,
    TokenCreationRequest,
};
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Starting token2022-launchpad demo");

    let config = ServiceConfig::from_env().context("Invalid LAUNCHPAD_* configuration")?;
    let program_id = config.program_pubkey()?;
    let mut app = AppContext::connect(config)?;

    match check_program_deployment(app.connection().as_ref(), &program_id).await {
        Ok(report) if report.found => info!("Program is deployed ({} bytes)", report.data_len),
        Ok(_) => warn!("Program {} is not deployed on {}", program_id, app.cluster()),
        Err(e) => warn!("Connectivity check failed: {:#}", e),
    }

    let mode = match std::env::var("LAUNCHPAD_KEYPAIR") {
        Ok(path) => {
            let keypair = read_keypair_file(&path)
                .map_err(|e| anyhow!("Failed to read keypair {}: {}", path, e))?;
            app.connect_wallet(Arc::new(KeypairWallet::new(keypair)))
        }
        Err(_) => ServiceMode::Disconnected,
    };
    info!("Service mode: {:?}", mode);

    if mode == ServiceMode::Disconnected {
        info!("Set LAUNCHPAD_KEYPAIR to a keypair file to run the workflows");
        return Ok(());
    }

    run_workflows(&app).await
}

/// Create a token, seed a pool for it and trade into it.
async fn run_workflows(app: &AppContext) -> Result<()> {
    let contracts = app.contracts();

    let token_request = TokenCreationRequest {
        name: "Demo".to_string(),
        symbol: "DEMO".to_string(),
        decimals: 6,
        supply: 1_000_000,
        enable_transfer_hook: true,
        enable_whitelist: true,
    };
    token_request.validate()?;

    let token = contracts.create_token(&token_request).await?;
    report_route("Token creation", &token.route);
    info!("Mint: {}", app.token_link(&token.value.mint_address));

    let pool_request = PoolCreationRequest {
        token_address: token.value.mint_address.clone(),
        sol_amount: 10.0,
        token_amount: 10_000.0,
        amm_platform: AmmPlatform::Raydium,
        pool_type: PoolType::Cpmm,
        fee_rate: 0.25,
    };
    pool_request.validate()?;
    if let Some(price) = quote::pool_price(pool_request.sol_amount, pool_request.token_amount) {
        info!("Initial price: {:.6} SOL per token", price);
    }

    let pool = contracts.create_pool(&pool_request).await?;
    report_route("Pool creation", &pool.route);
    info!("Pool: {}", pool.value.pool_address);

    let swap_request = SwapRequest {
        from_token_address: "SOL".to_string(),
        to_token_address: token.value.mint_address.clone(),
        from_amount: 1.0,
        slippage: 1.0,
        route: vec![pool_request.amm_platform.to_string()],
    };
    swap_request.validate()?;
    let estimate = quote::estimate_swap_output(swap_request.from_amount);
    info!(
        "Expecting {:.4}, minimum {:.4}",
        estimate,
        quote::minimum_received(estimate, swap_request.slippage)
    );

    let swap = contracts.swap_tokens(&swap_request).await?;
    report_route("Swap", &swap.route);
    info!(
        "Received {:.4} ({})",
        swap.value.output_amount,
        app.transaction_link(&swap.value.transaction_signature)
    );

    let balance = contracts.token_balance("SOL", &token.value.mint_address);
    info!("SOL balance (demo data): {}", balance.value);

    Ok(())
}

fn report_route(workflow: &str, route: &Route) {
    match route {
        Route::Real => info!("{} confirmed on-chain", workflow),
        Route::RealStub => warn!("{} served by a placeholder on the live path", workflow),
        Route::Mock => info!("{} simulated (demo mode)", workflow),
        Route::Fallback { real_error } => {
            warn!("{} simulated after the live path failed: {}", workflow, real_error)
        }
    }
}
