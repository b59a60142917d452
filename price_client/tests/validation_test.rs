use config_manager::{BirdEyeConfig, DexScreenerConfig};
use price_client::{BirdEyeClient, DexScreenerClient};
use price_core::{PriceError, PriceProvider};

const VALID_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
const BAD_MINT: &str = "not-a-mint";

// Both clients point at a closed loopback port. A request that actually got
// dispatched would surface as PriceError::Upstream, so the variants asserted
// below prove the validation gate short-circuited before any I/O.
fn birdeye_client() -> BirdEyeClient {
    BirdEyeClient::new(BirdEyeConfig {
        api_key: "test-key".to_string(),
        api_base_url: "http://127.0.0.1:1".to_string(),
        chain: "solana".to_string(),
        request_timeout_seconds: 1,
    })
    .unwrap()
}

fn dexscreener_client() -> DexScreenerClient {
    DexScreenerClient::new(DexScreenerConfig {
        api_base_url: "http://127.0.0.1:1".to_string(),
        request_timeout_seconds: 1,
    })
    .unwrap()
}

#[tokio::test]
async fn empty_address_list_is_rejected_before_any_request() {
    let err = birdeye_client().fetch_prices(&[]).await.unwrap_err();
    assert!(matches!(err, PriceError::NoAddresses));

    let err = dexscreener_client().fetch_prices(&[]).await.unwrap_err();
    assert!(matches!(err, PriceError::NoAddresses));
}

#[tokio::test]
async fn empty_address_is_rejected_for_overviews() {
    let err = birdeye_client().fetch_token_overview("").await.unwrap_err();
    assert!(matches!(err, PriceError::NoAddresses));

    let err = dexscreener_client()
        .fetch_token_overview("")
        .await
        .unwrap_err();
    assert!(matches!(err, PriceError::NoAddresses));
}

#[tokio::test]
async fn invalid_address_is_rejected_with_the_offender() {
    let addresses = vec![VALID_MINT.to_string(), BAD_MINT.to_string()];

    match birdeye_client().fetch_prices(&addresses).await.unwrap_err() {
        PriceError::InvalidAddress(address) => assert_eq!(address, BAD_MINT),
        other => panic!("expected InvalidAddress, got {other:?}"),
    }

    match dexscreener_client()
        .fetch_prices(&addresses)
        .await
        .unwrap_err()
    {
        PriceError::InvalidAddress(address) => assert_eq!(address, BAD_MINT),
        other => panic!("expected InvalidAddress, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_address_is_rejected_for_overviews() {
    match birdeye_client()
        .fetch_token_overview(BAD_MINT)
        .await
        .unwrap_err()
    {
        PriceError::InvalidAddress(address) => assert_eq!(address, BAD_MINT),
        other => panic!("expected InvalidAddress, got {other:?}"),
    }

    match dexscreener_client()
        .fetch_token_overview(BAD_MINT)
        .await
        .unwrap_err()
    {
        PriceError::InvalidAddress(address) => assert_eq!(address, BAD_MINT),
        other => panic!("expected InvalidAddress, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failures_surface_as_upstream_errors() {
    let addresses = vec![VALID_MINT.to_string()];

    let err = birdeye_client().fetch_prices(&addresses).await.unwrap_err();
    assert!(matches!(err, PriceError::Upstream(_)));

    let err = dexscreener_client()
        .fetch_prices(&addresses)
        .await
        .unwrap_err();
    assert!(matches!(err, PriceError::Upstream(_)));
}
