use uuid::Uuid;

use craftlink_link::domain::repository::CodeStore;
use craftlink_link::domain::types::LinkEvent;
use craftlink_link::error::LinkServiceError;
use craftlink_link::infra::memory::MemoryCodeStore;
use craftlink_link::usecase::apply_link::{ApplyLinkInput, ApplyLinkUseCase};
use craftlink_link::usecase::lifecycle::CodeLifecycle;

use crate::helpers::{
    MockAccountRepo, RecordingEventSink, TEST_MC_UUID, linked_account, live_code,
    memory_lifecycle, test_account,
};

fn shared_lifecycle() -> (
    CodeLifecycle<MemoryCodeStore, MemoryCodeStore>,
    CodeLifecycle<MemoryCodeStore, MemoryCodeStore>,
) {
    let primary = MemoryCodeStore::new();
    let mirror = MemoryCodeStore::new();
    let a = CodeLifecycle {
        primary: primary.clone(),
        mirror: mirror.clone(),
    };
    let b = CodeLifecycle { primary, mirror };
    (a, b)
}

fn input(username: &str, code: &str, uuid: &str) -> ApplyLinkInput {
    ApplyLinkInput {
        username: username.to_owned(),
        code: code.to_owned(),
        uuid: uuid.to_owned(),
    }
}

#[tokio::test]
async fn should_link_account_with_valid_code() {
    let account = test_account("alice");
    let repo = MockAccountRepo::new(vec![account.clone()]);
    let accounts = repo.accounts_handle();
    let sink = RecordingEventSink::new();
    let events = sink.events_handle();

    let (codes, probe) = shared_lifecycle();
    let generated = codes.generate(account.id, None).await.unwrap();

    let uc = ApplyLinkUseCase {
        accounts: repo,
        codes,
        events: sink,
    };
    let linked = uc
        .execute(input("Notch", &generated.code, TEST_MC_UUID))
        .await
        .unwrap();

    assert_eq!(linked.account_id, account.id);
    assert_eq!(linked.username, "alice");

    // account mutated
    let stored = accounts.lock().unwrap()[0].clone();
    assert!(stored.linked);
    assert_eq!(stored.mc_username.as_deref(), Some("Notch"));
    assert_eq!(stored.mc_uuid, Some(TEST_MC_UUID.parse().unwrap()));
    assert!(stored.mc_linked_at.is_some());

    // code consumed only now that the account persisted
    assert!(probe.validate(&generated.code).await.unwrap().is_none());

    // linked event published
    let events = events.lock().unwrap();
    assert!(matches!(
        events.as_slice(),
        [LinkEvent::AccountLinked { account_id, .. }] if *account_id == account.id
    ));
}

#[tokio::test]
async fn should_accept_lowercase_code_from_plugin() {
    let account = test_account("alice");
    let (codes, _) = shared_lifecycle();
    let generated = codes.generate(account.id, None).await.unwrap();

    let uc = ApplyLinkUseCase {
        accounts: MockAccountRepo::new(vec![account.clone()]),
        codes,
        events: RecordingEventSink::new(),
    };
    let linked = uc
        .execute(input(
            "Notch",
            &generated.code.to_ascii_lowercase(),
            TEST_MC_UUID,
        ))
        .await
        .unwrap();
    assert_eq!(linked.account_id, account.id);
}

#[tokio::test]
async fn should_reject_malformed_username_before_lookup() {
    let uc = ApplyLinkUseCase {
        accounts: MockAccountRepo::empty(),
        codes: memory_lifecycle(),
        events: RecordingEventSink::new(),
    };

    let result = uc.execute(input("no spaces!", "AB12CD", TEST_MC_UUID)).await;
    assert!(
        matches!(result, Err(LinkServiceError::InvalidInput(_))),
        "expected InvalidInput, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_malformed_uuid_before_lookup() {
    let uc = ApplyLinkUseCase {
        accounts: MockAccountRepo::empty(),
        codes: memory_lifecycle(),
        events: RecordingEventSink::new(),
    };

    let result = uc.execute(input("Notch", "AB12CD", "not-a-uuid")).await;
    assert!(
        matches!(result, Err(LinkServiceError::InvalidInput(_))),
        "expected InvalidInput, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_empty_code() {
    let uc = ApplyLinkUseCase {
        accounts: MockAccountRepo::empty(),
        codes: memory_lifecycle(),
        events: RecordingEventSink::new(),
    };

    let result = uc.execute(input("Notch", "   ", TEST_MC_UUID)).await;
    assert!(
        matches!(result, Err(LinkServiceError::InvalidInput(_))),
        "expected InvalidInput, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_code() {
    let uc = ApplyLinkUseCase {
        accounts: MockAccountRepo::empty(),
        codes: memory_lifecycle(),
        events: RecordingEventSink::new(),
    };

    let result = uc.execute(input("Notch", "AB12CD", TEST_MC_UUID)).await;
    assert!(
        matches!(result, Err(LinkServiceError::InvalidOrExpiredCode)),
        "expected InvalidOrExpiredCode, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_expired_code() {
    let account = test_account("alice");
    let (codes, seed) = shared_lifecycle();
    seed.primary
        .insert(&live_code(account.id, "OLD999", -60))
        .await
        .unwrap();

    let uc = ApplyLinkUseCase {
        accounts: MockAccountRepo::new(vec![account]),
        codes,
        events: RecordingEventSink::new(),
    };
    let result = uc.execute(input("Notch", "OLD999", TEST_MC_UUID)).await;
    assert!(
        matches!(result, Err(LinkServiceError::InvalidOrExpiredCode)),
        "expected InvalidOrExpiredCode, got {result:?}"
    );
}

#[tokio::test]
async fn should_report_missing_owner_account() {
    // a live code whose owner row has vanished — data-integrity fault
    let (codes, seed) = shared_lifecycle();
    seed.primary
        .insert(&live_code(Uuid::new_v4(), "ORPHAN", 600))
        .await
        .unwrap();

    let uc = ApplyLinkUseCase {
        accounts: MockAccountRepo::empty(),
        codes,
        events: RecordingEventSink::new(),
    };
    let result = uc.execute(input("Notch", "ORPHAN", TEST_MC_UUID)).await;
    assert!(
        matches!(result, Err(LinkServiceError::OwnerAccountMissing)),
        "expected OwnerAccountMissing, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_uuid_already_linked_elsewhere_without_consuming_code() {
    let mc_uuid: Uuid = TEST_MC_UUID.parse().unwrap();
    let holder = linked_account("bob", "Notch", mc_uuid);
    let claimant = test_account("alice");
    let repo = MockAccountRepo::new(vec![holder.clone(), claimant.clone()]);
    let accounts = repo.accounts_handle();
    let sink = RecordingEventSink::new();
    let events = sink.events_handle();

    let (codes, probe) = shared_lifecycle();
    let generated = codes.generate(claimant.id, None).await.unwrap();

    let uc = ApplyLinkUseCase {
        accounts: repo,
        codes,
        events: sink,
    };
    let result = uc
        .execute(input("Notch", &generated.code, TEST_MC_UUID))
        .await;
    assert!(
        matches!(result, Err(LinkServiceError::UuidAlreadyLinked)),
        "expected UuidAlreadyLinked, got {result:?}"
    );

    // neither account mutated
    let stored = accounts.lock().unwrap();
    assert!(!stored.iter().find(|a| a.id == claimant.id).unwrap().linked);
    assert_eq!(
        stored.iter().find(|a| a.id == holder.id).unwrap().mc_uuid,
        Some(mc_uuid)
    );
    drop(stored);

    // the code survives for a later, distinct attempt
    assert!(probe.validate(&generated.code).await.unwrap().is_some());
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_allow_relink_when_uuid_belongs_to_the_same_account() {
    let mc_uuid: Uuid = TEST_MC_UUID.parse().unwrap();
    // half-linked row: the UUID stuck around but the linked flag was lost
    let mut account = test_account("alice");
    account.mc_uuid = Some(mc_uuid);

    let (codes, _) = shared_lifecycle();
    let generated = codes.generate(account.id, None).await.unwrap();

    let uc = ApplyLinkUseCase {
        accounts: MockAccountRepo::new(vec![account.clone()]),
        codes,
        events: RecordingEventSink::new(),
    };
    let linked = uc
        .execute(input("Notch", &generated.code, TEST_MC_UUID))
        .await
        .unwrap();
    assert_eq!(linked.account_id, account.id);
}
