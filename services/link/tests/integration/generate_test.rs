use chrono::Utc;
use uuid::Uuid;

use craftlink_link::error::LinkServiceError;
use craftlink_link::usecase::generate::{GenerateCodeInput, GenerateCodeUseCase};

use crate::helpers::{
    MockAccountRepo, degraded_lifecycle, linked_account, memory_lifecycle, test_account,
};

fn input(account_id: Uuid) -> GenerateCodeInput {
    GenerateCodeInput {
        account_id,
        mc_username: None,
        ttl_minutes: None,
    }
}

#[tokio::test]
async fn should_generate_code_for_unlinked_account() {
    let account = test_account("alice");
    let uc = GenerateCodeUseCase {
        accounts: MockAccountRepo::new(vec![account.clone()]),
        codes: memory_lifecycle(),
    };

    let generated = uc.execute(input(account.id)).await.unwrap();

    assert_eq!(generated.code.len(), 6, "link code should be 6 characters");
    assert!(generated.expires_at > Utc::now());
    assert!(!generated.degraded);
}

#[tokio::test]
async fn should_reject_generate_for_linked_account() {
    let account = linked_account("alice", "Notch", Uuid::new_v4());
    let uc = GenerateCodeUseCase {
        accounts: MockAccountRepo::new(vec![account.clone()]),
        codes: memory_lifecycle(),
    };

    let result = uc.execute(input(account.id)).await;
    assert!(
        matches!(result, Err(LinkServiceError::AlreadyLinked)),
        "expected AlreadyLinked, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_not_found_for_unknown_account() {
    let uc = GenerateCodeUseCase {
        accounts: MockAccountRepo::empty(),
        codes: memory_lifecycle(),
    };

    let result = uc.execute(input(Uuid::new_v4())).await;
    assert!(
        matches!(result, Err(LinkServiceError::AccountNotFound)),
        "expected AccountNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_store_declared_mc_username_on_account() {
    let account = test_account("alice");
    let repo = MockAccountRepo::new(vec![account.clone()]);
    let accounts = repo.accounts_handle();
    let uc = GenerateCodeUseCase {
        accounts: repo,
        codes: memory_lifecycle(),
    };

    uc.execute(GenerateCodeInput {
        account_id: account.id,
        mc_username: Some("Notch".to_owned()),
        ttl_minutes: None,
    })
    .await
    .unwrap();

    let stored = accounts.lock().unwrap()[0].mc_username.clone();
    assert_eq!(stored, Some("Notch".to_owned()));
}

#[tokio::test]
async fn should_reject_malformed_declared_mc_username() {
    let account = test_account("alice");
    let uc = GenerateCodeUseCase {
        accounts: MockAccountRepo::new(vec![account.clone()]),
        codes: memory_lifecycle(),
    };

    let result = uc
        .execute(GenerateCodeInput {
            account_id: account.id,
            mc_username: Some("not a name".to_owned()),
            ttl_minutes: None,
        })
        .await;
    assert!(
        matches!(result, Err(LinkServiceError::InvalidInput(_))),
        "expected InvalidInput, got {result:?}"
    );
}

#[tokio::test]
async fn should_succeed_with_warning_when_durable_store_down() {
    let account = test_account("alice");
    let uc = GenerateCodeUseCase {
        accounts: MockAccountRepo::new(vec![account.clone()]),
        codes: degraded_lifecycle(),
    };

    let generated = uc.execute(input(account.id)).await.unwrap();
    assert!(generated.degraded, "expected degraded-durability warning");
}
