use chrono::Duration;
use uuid::Uuid;

use craftlink_link::domain::repository::CodeStore;
use craftlink_link::error::LinkServiceError;
use craftlink_link::infra::memory::MemoryCodeStore;
use craftlink_link::usecase::lifecycle::CodeLifecycle;
use craftlink_link::usecase::pending::{PendingCodeInput, PendingCodeUseCase};

use crate::helpers::{
    MockAccountRepo, TEST_MC_UUID, linked_account, live_code, memory_lifecycle, test_account,
};

fn input(username: &str) -> PendingCodeInput {
    PendingCodeInput {
        username: username.to_owned(),
        uuid: TEST_MC_UUID.to_owned(),
    }
}

#[tokio::test]
async fn should_find_pending_code_for_declared_username() {
    let mut account = test_account("alice");
    account.mc_username = Some("Notch".to_owned());

    let codes = memory_lifecycle();
    let generated = codes.generate(account.id, None).await.unwrap();

    let uc = PendingCodeUseCase {
        accounts: MockAccountRepo::new(vec![account]),
        codes,
    };
    let pending = uc.execute(input("Notch")).await.unwrap().unwrap();
    assert_eq!(pending.code, generated.code);
}

#[tokio::test]
async fn should_find_pending_code_when_owner_declared_no_username() {
    let account = test_account("alice");

    let codes = memory_lifecycle();
    let generated = codes.generate(account.id, None).await.unwrap();

    let uc = PendingCodeUseCase {
        accounts: MockAccountRepo::new(vec![account]),
        codes,
    };
    let pending = uc.execute(input("Notch")).await.unwrap().unwrap();
    assert_eq!(pending.code, generated.code);
}

#[tokio::test]
async fn should_skip_codes_whose_owner_declared_a_different_username() {
    let mut account = test_account("alice");
    account.mc_username = Some("SomeoneElse".to_owned());

    let codes = memory_lifecycle();
    codes.generate(account.id, None).await.unwrap();

    let uc = PendingCodeUseCase {
        accounts: MockAccountRepo::new(vec![account]),
        codes,
    };
    assert!(uc.execute(input("Notch")).await.unwrap().is_none());
}

#[tokio::test]
async fn should_skip_codes_of_linked_owners() {
    let account = linked_account("alice", "Notch", Uuid::new_v4());

    let codes = memory_lifecycle();
    codes.generate(account.id, None).await.unwrap();

    let uc = PendingCodeUseCase {
        accounts: MockAccountRepo::new(vec![account]),
        codes,
    };
    assert!(uc.execute(input("Notch")).await.unwrap().is_none());
}

#[tokio::test]
async fn should_prefer_the_newest_pending_code() {
    let older_owner = test_account("alice");
    let newer_owner = test_account("bob");

    let primary = MemoryCodeStore::new();
    let mut old_code = live_code(older_owner.id, "OLD111", 600);
    old_code.created_at -= Duration::seconds(60);
    primary.insert(&old_code).await.unwrap();
    primary
        .insert(&live_code(newer_owner.id, "NEW222", 600))
        .await
        .unwrap();

    let uc = PendingCodeUseCase {
        accounts: MockAccountRepo::new(vec![older_owner, newer_owner]),
        codes: CodeLifecycle {
            primary,
            mirror: MemoryCodeStore::new(),
        },
    };
    let pending = uc.execute(input("Notch")).await.unwrap().unwrap();
    assert_eq!(pending.code, "NEW222");
}

#[tokio::test]
async fn should_reject_malformed_plugin_input() {
    let uc = PendingCodeUseCase {
        accounts: MockAccountRepo::empty(),
        codes: memory_lifecycle(),
    };

    let result = uc
        .execute(PendingCodeInput {
            username: "bad name".to_owned(),
            uuid: TEST_MC_UUID.to_owned(),
        })
        .await;
    assert!(matches!(result, Err(LinkServiceError::InvalidInput(_))));

    let result = uc
        .execute(PendingCodeInput {
            username: "Notch".to_owned(),
            uuid: "nope".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(LinkServiceError::InvalidInput(_))));
}
