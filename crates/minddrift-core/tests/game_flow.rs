//! End-to-end game flow against a file-backed cache and pages directory.

use std::sync::Arc;
use std::time::Duration;

use minddrift_core::providers::llm::fake::FakeClient;
use minddrift_core::{
    AnswerCache, DocumentStore, GameConfig, GameService, ModelConfig, PredictionSource,
    PromptPipeline, ProviderKind, FALLBACK_QUESTION_ID,
};
use tempfile::tempdir;

fn answers(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn service_at(dir: &std::path::Path, client: Arc<FakeClient>) -> GameService {
    let cache = AnswerCache::open(&dir.join("minddrift.db")).expect("open cache");
    let documents =
        DocumentStore::new(dir.join("generated_pages"), "http://localhost:8000").expect("store");
    let pipeline = PromptPipeline::new(client, Duration::from_secs(5));
    GameService::new(cache, pipeline, documents)
}

#[tokio::test]
async fn wrong_guess_retry_then_confirm_survives_restart() {
    let tmp = tempdir().unwrap();
    let first_round = answers(&["Is it alive?: No", "Is it metal?: Yes"]);

    let client = Arc::new(
        FakeClient::new("fake".into())
            .with_text("Spoon")
            .with_text("<html>spoon</html>")
            .with_text(r#"{"questions": [{"id": 101, "text": "Is it sharp?"}]}"#)
            .with_text("Knife")
            .with_text("```html\n<html>knife</html>\n```"),
    );
    let svc = service_at(tmp.path(), client.clone());

    let wrong = svc.predict(&first_round).await.unwrap();
    assert_eq!(wrong.label, "Spoon");

    let more = svc.continue_game(&first_round).await;
    assert_eq!(more[0].text, "Is it sharp?");

    let mut second_round = first_round.clone();
    second_round.push("Is it sharp?: Yes".to_string());
    let right = svc.predict(&second_round).await.unwrap();
    assert_eq!(right.label, "Knife");
    assert_eq!(right.document, "<html>knife</html>");
    assert_eq!(
        client.calls(),
        vec!["guess", "synthesize", "questions", "guess", "synthesize"]
    );

    svc.confirm_success(second_round.clone(), right.label.clone(), right.document.clone())
        .await
        .unwrap();
    drop(svc);

    // Fresh process: new service over the same files, model must not be hit.
    let idle = Arc::new(FakeClient::new("fake".into()));
    let restarted = service_at(tmp.path(), idle.clone());
    let cached = restarted.predict(&second_round).await.unwrap();
    assert_eq!(cached.source, PredictionSource::Cache);
    assert_eq!(cached.label, "Knife");
    assert_eq!(cached.url, "http://localhost:8000/generated_pages/Knife.html");
    assert_eq!(idle.call_count(), 0);

    // The unconfirmed first round is still a miss.
    let again = restarted.predict(&first_round).await.unwrap();
    assert_eq!(again.source, PredictionSource::Generated);
}

#[tokio::test]
async fn malformed_questions_yield_single_fallback() {
    let tmp = tempdir().unwrap();
    let client = Arc::new(FakeClient::new("fake".into()).with_text("questions: one, two"));
    let svc = service_at(tmp.path(), client.clone());

    let batch = svc.continue_game(&answers(&["x"])).await;
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].id, FALLBACK_QUESTION_ID);
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn from_config_with_fake_provider_plays_a_round() {
    let tmp = tempdir().unwrap();
    let config = GameConfig::default()
        .with_model(ModelConfig::default().with_provider(ProviderKind::Fake))
        .with_db_path(tmp.path().join("game.db"))
        .with_pages_dir(tmp.path().join("pages"))
        .with_public_url("http://127.0.0.1:9000");

    let svc = GameService::from_config(&config).unwrap();
    let result = svc.predict(&answers(&["Is it alive?: No"])).await.unwrap();
    assert_eq!(result.label, "Teapot");
    assert!(result.document.contains("btn-accept"));
    assert_eq!(result.url, "http://127.0.0.1:9000/generated_pages/Teapot.html");
    assert!(tmp.path().join("pages").join("Teapot.html").exists());

    assert_eq!(svc.continue_game(&answers(&["x"])).await.len(), 5);
}

#[test]
fn from_config_rejects_missing_key() {
    let tmp = tempdir().unwrap();
    let config = GameConfig::default().with_db_path(tmp.path().join("game.db"));
    assert!(GameService::from_config(&config).is_err());
}
