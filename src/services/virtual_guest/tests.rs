//! Unit tests for the virtual guest service.

use super::*;
use crate::datatypes::{Datacenter, VIRTUAL_GUEST_UPGRADE_ORDER};
use crate::test_support::{ScriptedClient, fixtures, json_disk_prices};
use rstest::{fixture, rstest};

#[fixture]
fn client() -> ScriptedClient {
    ScriptedClient::new()
}

fn service(client: &ScriptedClient) -> VirtualGuestService {
    VirtualGuestService::new(client.shared())
}

fn template() -> VirtualGuestTemplate {
    VirtualGuestTemplate {
        hostname: String::from("fake-hostname"),
        domain: String::from("fake.domain.com"),
        start_cpus: 2,
        max_memory: 1024,
        datacenter: Datacenter {
            name: String::from("fake-datacenter-name"),
        },
        ..VirtualGuestTemplate::default()
    }
}

async fn power_call(service: &VirtualGuestService, method: &str) -> Result<bool, SoftLayerError> {
    match method {
        "powerCycle" => service.power_cycle(1234567).await,
        "powerOff" => service.power_off(1234567).await,
        "powerOffSoft" => service.power_off_soft(1234567).await,
        "powerOn" => service.power_on(1234567).await,
        "rebootDefault" => service.reboot_default(1234567).await,
        "rebootSoft" => service.reboot_soft(1234567).await,
        "rebootHard" => service.reboot_hard(1234567).await,
        "deleteObject" => service.delete_object(1234567).await,
        "setUserMetadata" => service.set_metadata(1234567, "fake-metadata").await,
        other => panic!("unexpected method {other}"),
    }
}

#[rstest]
#[tokio::test]
async fn create_object_decodes_echoed_guest(client: ScriptedClient) {
    client.push_response(fixtures::CREATE_OBJECT);
    let guest = service(&client)
        .create_object(&template())
        .await
        .expect("created");
    assert!(guest.id > 0);
    assert_eq!(client.methods(), vec!["createObject"]);
    let request = client.invocations().pop().expect("recorded");
    assert_eq!(request.object_id, None);
    let parameter = request.parameters.first().expect("template parameter");
    assert_eq!(parameter["hostname"], "fake-hostname");
}

#[rstest]
#[tokio::test]
async fn create_object_validates_before_calling(client: ScriptedClient) {
    let err = service(&client)
        .create_object(&VirtualGuestTemplate::default())
        .await
        .expect_err("invalid template");
    let SoftLayerError::Validation(message) = err else {
        panic!("expected validation error, got {err:?}");
    };
    for field in ["Hostname", "Domain", "StartCpus", "MaxMemory", "Datacenter"] {
        assert!(message.contains(field), "{field} missing from: {message}");
    }
    assert!(client.invocations().is_empty());
}

#[rstest]
#[tokio::test]
async fn get_object_decodes_fixture(client: ScriptedClient) {
    client.push_response(fixtures::GET_OBJECT);
    let guest = service(&client).get_object(1234567).await.expect("guest");
    assert_eq!(guest.id, 1234567);
    assert_eq!(guest.hostname, "bosh-ecpi1");
    assert_eq!(guest.location.name, "ams01");
    assert!(guest.last_verified_date.is_none());
    assert!(guest.create_date.is_some());
}

#[rstest]
#[tokio::test]
async fn edit_object_returns_false_without_error(client: ScriptedClient) {
    client.push_response("false");
    let edit = VirtualGuestEdit {
        notes: Some(String::from("fake-notes")),
        ..VirtualGuestEdit::default()
    };
    assert_eq!(service(&client).edit_object(1, &edit).await, Ok(false));
}

#[rstest]
#[case("powerCycle", "power cycle")]
#[case("powerOff", "power off")]
#[case("powerOffSoft", "soft power off")]
#[case("powerOn", "power on")]
#[case("rebootDefault", "default reboot")]
#[case("rebootSoft", "soft reboot")]
#[case("rebootHard", "hard reboot")]
#[case("deleteObject", "delete")]
#[case("setUserMetadata", "set metadata on")]
#[tokio::test]
async fn boolean_actions_accept_true_and_reject_false(
    client: ScriptedClient,
    #[case] method: &str,
    #[case] action: &str,
) {
    let service = service(&client);

    client.push_response("true");
    assert_eq!(power_call(&service, method).await, Ok(true));

    client.push_response("false");
    let err = power_call(&service, method)
        .await
        .expect_err("false is a failure");
    assert_eq!(
        err,
        SoftLayerError::Rejected {
            action: action.to_owned(),
            id: 1234567
        }
    );
    assert!(err.to_string().contains(action), "{err}");
    assert_eq!(client.methods(), vec![method, method]);
}

#[rstest]
#[tokio::test]
async fn boolean_actions_surface_malformed_payloads(client: ScriptedClient) {
    client.push_response("fake");
    let err = service(&client)
        .power_on(1)
        .await
        .expect_err("malformed");
    assert!(matches!(err, SoftLayerError::Protocol { ref payload, .. } if payload == "fake"));
}

#[rstest]
#[tokio::test]
async fn set_metadata_sends_base64_payload(client: ScriptedClient) {
    client.push_response("true");
    service(&client)
        .set_metadata(1, "fake-metadata")
        .await
        .expect("accepted");
    let request = client.invocations().pop().expect("recorded");
    assert_eq!(request.method, "setUserMetadata");
    assert_eq!(
        request.parameters,
        vec![json!([STANDARD.encode("fake-metadata")])]
    );
}

#[rstest]
#[case("true", Some(true))]
#[case("false", Some(false))]
#[case("fake", None)]
#[tokio::test]
async fn is_pingable_decodes_tokens(
    client: ScriptedClient,
    #[case] body: &str,
    #[case] expected: Option<bool>,
) {
    client.push_response(body);
    let outcome = service(&client).is_pingable(1).await;
    match expected {
        Some(value) => assert_eq!(outcome, Ok(value)),
        None => {
            let err = outcome.expect_err("malformed");
            assert!(
                err.to_string()
                    .contains("Failed to checking that virtual guest is pingable"),
                "{err}"
            );
        }
    }
}

#[rstest]
#[tokio::test]
async fn is_pingable_propagates_transport_errors(client: ScriptedClient) {
    client.push_transport_error("connection refused");
    let err = service(&client).is_pingable(1).await.expect_err("transport");
    assert!(err.is_transport());
}

#[rstest]
#[tokio::test]
async fn power_state_and_ip_address(client: ScriptedClient) {
    client.push_response(fixtures::GET_POWER_STATE);
    client.push_response("\"159.99.99.99\"");
    let service = service(&client);
    let state = service.get_power_state(1).await.expect("state");
    assert_eq!(state.key_name, "RUNNING");
    assert_eq!(
        service.get_primary_ip_address(1).await,
        Ok(String::from("159.99.99.99"))
    );
}

#[rstest]
#[tokio::test]
async fn user_data_preserves_provider_order(client: ScriptedClient) {
    client.push_response(fixtures::GET_USER_DATA);
    let attributes = service(&client).get_user_data(1).await.expect("user data");
    let keynames: Vec<&str> = attributes
        .iter()
        .map(|attribute| attribute.attribute_type.keyname.as_str())
        .collect();
    assert_eq!(keynames, vec!["USER_DATA", "FAKE_DATA"]);
}

#[rstest]
#[tokio::test]
async fn active_transactions_list_and_head(client: ScriptedClient) {
    client.push_response(fixtures::GET_ACTIVE_TRANSACTIONS);
    client.push_response(fixtures::GET_ACTIVE_TRANSACTIONS);
    let service = service(&client);
    let all = service.get_active_transactions(1234567).await.expect("list");
    assert_eq!(all.len(), 2);
    let head = service.get_active_transaction(1234567).await.expect("head");
    assert_eq!(Some(&head), all.first());
    assert_eq!(head.guest_id, 1234567);
}

#[rstest]
#[tokio::test]
async fn active_transaction_fails_when_quiescent(client: ScriptedClient) {
    client.push_response("[]");
    let service = service(&client);
    assert_eq!(
        service.get_active_transaction(7).await,
        Err(SoftLayerError::NoActiveTransaction { id: 7 })
    );
}

#[rstest]
#[tokio::test]
async fn ssh_keys_and_metadata_disk(client: ScriptedClient) {
    client.push_response(fixtures::GET_SSH_KEYS);
    client.push_response(fixtures::CONFIGURE_METADATA_DISK);
    let service = service(&client);
    let keys = service.get_ssh_keys(1).await.expect("keys");
    assert_eq!(keys.first().map(|key| key.id), Some(84386));
    let transaction = service.configure_metadata_disk(1).await.expect("txn");
    assert_eq!(transaction.id, 12476326);
}

#[rstest]
#[tokio::test]
async fn upgrade_prices_request_a_mask(client: ScriptedClient) {
    client.push_response(fixtures::GET_UPGRADE_ITEM_PRICES);
    let prices = service(&client)
        .get_upgrade_item_prices(1)
        .await
        .expect("prices");
    assert_eq!(prices.first().map(|price| price.id), Some(12345));
    let request = client.invocations().pop().expect("recorded");
    assert_eq!(request.object_mask.as_deref(), Some(UPGRADE_ITEM_PRICES_MASK));
}

#[rstest]
#[tokio::test]
async fn attach_ephemeral_disk_orders_exact_tier(client: ScriptedClient) {
    client.push_response(fixtures::GET_UPGRADE_ITEM_PRICES);
    client.push_response(fixtures::PLACE_ORDER);
    service(&client)
        .attach_ephemeral_disk(1234567, 25)
        .await
        .expect("ordered");
    assert_eq!(client.methods(), vec!["getUpgradeItemPrices", "placeOrder"]);
    let order = client.invocations().pop().expect("order recorded");
    assert_eq!(order.service, "SoftLayer_Product_Order");
    let container = order.parameters.first().expect("order container");
    assert_eq!(container["complexType"], VIRTUAL_GUEST_UPGRADE_ORDER);
    assert_eq!(container["prices"][0]["id"], 12345);
    assert_eq!(container["virtualGuests"][0]["id"], 1234567);
    assert_eq!(container["properties"][0]["name"], "MAINTENANCE_WINDOW");
}

#[rstest]
#[tokio::test]
async fn attach_ephemeral_disk_fails_one_above_largest_tier(client: ScriptedClient) {
    client.push_response(fixtures::GET_UPGRADE_ITEM_PRICES);
    let err = service(&client)
        .attach_ephemeral_disk(1234567, 26)
        .await
        .expect_err("too large");
    assert_eq!(err.to_string(), "No proper local disk for size 26");
    assert_eq!(client.methods(), vec!["getUpgradeItemPrices"]);
}

#[rstest]
#[tokio::test]
async fn attach_ephemeral_disk_rejects_negative_size(client: ScriptedClient) {
    let err = service(&client)
        .attach_ephemeral_disk(1, -1)
        .await
        .expect_err("negative");
    assert!(
        err.to_string()
            .contains("Ephemeral disk size can not be negative: -1")
    );
    assert!(client.invocations().is_empty());
}

#[rstest]
#[tokio::test]
async fn attach_ephemeral_disk_skips_zero_by_default(client: ScriptedClient) {
    service(&client)
        .attach_ephemeral_disk(1, 0)
        .await
        .expect("nothing to do");
    assert!(client.invocations().is_empty());
}

#[rstest]
#[tokio::test]
async fn zero_size_order_policy_buys_smallest_tier(client: ScriptedClient) {
    client.push_response(json_disk_prices(&[(7, 100), (8, 10)]));
    client.push_response(fixtures::PLACE_ORDER);
    let service = service(&client).with_disk_selector(
        EphemeralDiskSelector::default().with_zero_size_policy(ZeroSizePolicy::Order),
    );
    service.attach_ephemeral_disk(1, 0).await.expect("ordered");
    let order = client.invocations().pop().expect("order recorded");
    let container = order.parameters.first().expect("order container");
    assert_eq!(container["prices"][0]["id"], 8);
}

#[rstest]
#[tokio::test]
async fn attach_ephemeral_disk_propagates_price_failures(client: ScriptedClient) {
    client.push_transport_error("timeout");
    let err = service(&client)
        .attach_ephemeral_disk(1, 10)
        .await
        .expect_err("transport");
    assert!(err.is_transport());
}
