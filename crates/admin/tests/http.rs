use admin::{
    Api, ApiError, CharacterBuild, HttpApi, PageController, RelicPiece, Slot, relic_label,
};
use httpmock::prelude::*;
use serde_json::json;

fn build_json() -> serde_json::Value {
    json!({
        "id": "build-1",
        "Playable_Characters_id": "kafka",
        "Relic_Headpiece_id": "head-1",
        "Relic_Handpiece_id": "hand-1",
        "Relic_Bodypiece_id": "body-1",
        "Relic_Feetpiece_id": "feet-1",
        "Relic_Planarsphere_id": "sphere-1",
        "Relic_Linkrope_id": "rope-1"
    })
}

#[tokio::test]
async fn edited_build_is_sent_as_put_with_new_headpiece() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/character_build");
            then.status(200).json_body(json!([build_json()]));
        })
        .await;
    let mut expected = build_json();
    expected["Relic_Headpiece_id"] = json!("head-2");
    let put = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/character_build")
                .json_body(expected);
            then.status(200);
        })
        .await;

    let api = HttpApi::for_builds(&server.base_url()).unwrap();
    let mut controller = PageController::<CharacterBuild, _>::new(api);
    controller.refresh().await.unwrap();
    assert!(controller.begin_edit_by_id("build-1"));
    controller
        .set_field(admin::BuildField::Relic(Slot::Headpiece), "head-2")
        .unwrap();
    controller.submit().await.unwrap();

    put.assert_async().await;
    list.assert_hits_async(2).await;
}

#[tokio::test]
async fn build_references_combine_characters_and_relics() {
    let server = MockServer::start_async().await;
    let characters = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/character_build")
                .query_param("action", "get-characters");
            then.status(200)
                .json_body(json!([{ "id": "kafka", "name": "Kafka" }]));
        })
        .await;
    let relics = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/character_build")
                .query_param("action", "get-relics");
            then.status(200).json_body(json!({
                "headpieces": [{
                    "id": "head-1",
                    "name": "Genius",
                    "details": {
                        "mainStat": "ATK",
                        "mainStatNum": 311,
                        "substats": [
                            { "name": "SPD", "value": 8 },
                            { "name": "CRIT Rate", "value": 6.5 }
                        ]
                    }
                }]
            }));
        })
        .await;

    let api = HttpApi::for_builds(&server.base_url()).unwrap();
    let refs = Api::<CharacterBuild>::references(&api).await.unwrap();

    characters.assert_async().await;
    relics.assert_async().await;
    assert_eq!(refs.characters[0].name, "Kafka");
    assert!(refs.relics.for_slot(Slot::Linkrope).is_empty());
    assert_eq!(
        relic_label(&refs.relics.for_slot(Slot::Headpiece)[0]),
        "Genius - ATK (311) | Substats: SPD (8), CRIT Rate (6.5)"
    );
}

#[tokio::test]
async fn delete_passes_id_as_query_parameter() {
    let server = MockServer::start_async().await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/api/relic_bodypiece")
                .query_param("id", "relic001");
            then.status(200);
        })
        .await;

    let api = HttpApi::for_slot(&server.base_url(), Slot::Bodypiece).unwrap();
    Api::<RelicPiece>::delete(&api, "relic001").await.unwrap();
    delete.assert_async().await;
}

#[tokio::test]
async fn conflict_response_becomes_conflict_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/relic_bodypiece");
            then.status(409).json_body(json!({
                "error": "conflict",
                "message": "relic_bodypiece `relic001` already exists"
            }));
        })
        .await;

    let api = HttpApi::for_slot(&server.base_url(), Slot::Bodypiece).unwrap();
    let piece = RelicPiece {
        id: "relic001".into(),
        ..Default::default()
    };
    let err = Api::<RelicPiece>::create(&api, &piece).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Conflict("relic_bodypiece `relic001` already exists".into())
    );
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let api = HttpApi::for_slot("http://127.0.0.1:1", Slot::Bodypiece).unwrap();
    let err = Api::<RelicPiece>::list(&api).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
