use uuid::Uuid;

use cgcs_api::domain::types::BudgetFilter;
use cgcs_api::error::ApiError;
use cgcs_api::usecase::budget::{
    CreateBudgetInput, CreateBudgetUseCase, DeleteBudgetUseCase, GetBudgetUseCase,
    ListBudgetsUseCase, UpdateBudgetInput, UpdateBudgetUseCase,
};
use cgcs_domain::audit::AuditKind;
use cgcs_domain::budget::BudgetStatus;
use cgcs_domain::pagination::PageRequest;
use cgcs_testing::auth::MockAuth;

use crate::helpers::{
    MockAuditRepo, MockBudgetRepo, MockCentreRepo, test_budget, test_centre, test_regisseur,
};

fn input(code: &str, centre_id: Uuid) -> CreateBudgetInput {
    CreateBudgetInput {
        code: code.to_owned(),
        nom: "Budget de fonctionnement".to_owned(),
        annee: 2025,
        type_budget: "FONCTIONNEMENT".to_owned(),
        centre_id,
        montant_total: Some(2_000_000.0),
        montant_valide: Some(500_000.0),
        description: None,
    }
}

#[tokio::test]
async fn should_read_back_budget_created_by_chef() {
    let centre = test_centre("CSU-KHG-01", None);
    let budgets = MockBudgetRepo::new(vec![], vec![centre.clone()]);
    let audit = MockAuditRepo::empty();
    let chef = MockAuth::chef_centre(centre.id);

    let created = CreateBudgetUseCase {
        budgets: budgets.clone(),
        centres: MockCentreRepo::new(vec![centre.clone()]),
        audit: audit.clone(),
    }
    .execute(&chef.identity, input("BUD-2025-001", centre.id))
    .await
    .unwrap();

    let detail = GetBudgetUseCase {
        budgets: budgets.clone(),
    }
    .execute(&chef.identity, created.id)
    .await
    .unwrap();

    assert_eq!(detail.budget.code, "BUD-2025-001");
    assert_eq!(detail.budget.statut, BudgetStatus::Brouillon);
    assert_eq!(detail.budget.cree_par, chef.identity.user_id);
    assert_eq!(detail.budget.montant_restant, 1_500_000.0);
    assert!(detail.lignes.is_empty());
    assert!(detail.sources.is_empty());
    assert_eq!(audit.kinds(), vec![AuditKind::Create]);
}

#[tokio::test]
async fn should_forbid_chef_creating_budget_for_another_centre() {
    let own = test_centre("CSU-KHG-01", None);
    let other = test_centre("CSU-KHG-02", None);
    let budgets = MockBudgetRepo::new(vec![], vec![own.clone(), other.clone()]);
    let chef = MockAuth::chef_centre(own.id);

    let err = CreateBudgetUseCase {
        budgets: budgets.clone(),
        centres: MockCentreRepo::new(vec![own, other.clone()]),
        audit: MockAuditRepo::empty(),
    }
    .execute(&chef.identity, input("BUD-2025-002", other.id))
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::Forbidden));
    assert!(budgets.budgets.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_hide_budgets_outside_caller_scope() {
    let regisseur = test_regisseur("REG-PORO");
    let supervised = test_centre("CSU-KHG-01", Some(regisseur.id));
    let elsewhere = test_centre("CSU-ABJ-01", None);
    let author = Uuid::now_v7();
    let inside = test_budget("BUD-IN", supervised.id, author);
    let outside = test_budget("BUD-OUT", elsewhere.id, author);
    let budgets = MockBudgetRepo::new(
        vec![inside.clone(), outside.clone()],
        vec![supervised.clone(), elsewhere.clone()],
    );

    let listed = ListBudgetsUseCase {
        budgets: budgets.clone(),
    }
    .execute(
        &MockAuth::regisseur(regisseur.id).identity,
        BudgetFilter::default(),
        PageRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(
        listed.iter().map(|b| b.id).collect::<Vec<_>>(),
        vec![inside.id]
    );

    let err = GetBudgetUseCase {
        budgets: budgets.clone(),
    }
    .execute(&MockAuth::chef_centre(supervised.id).identity, outside.id)
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::BudgetNotFound));

    let all = ListBudgetsUseCase { budgets }
        .execute(
            &MockAuth::admin().identity,
            BudgetFilter::default(),
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn should_reserve_validation_statuses_to_supervisors() {
    let regisseur = test_regisseur("REG-PORO");
    let centre = test_centre("CSU-KHG-01", Some(regisseur.id));
    let budget = test_budget("BUD-2025-001", centre.id, Uuid::now_v7());
    let budgets = MockBudgetRepo::new(vec![budget.clone()], vec![centre.clone()]);
    let audit = MockAuditRepo::empty();
    let update = UpdateBudgetUseCase {
        budgets: budgets.clone(),
        audit: audit.clone(),
    };

    let err = update
        .execute(
            &MockAuth::chef_centre(centre.id).identity,
            budget.id,
            UpdateBudgetInput {
                statut: Some(BudgetStatus::Valide),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden));

    let submitted = update
        .execute(
            &MockAuth::chef_centre(centre.id).identity,
            budget.id,
            UpdateBudgetInput {
                statut: Some(BudgetStatus::EnAttenteValidation),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(submitted.statut, BudgetStatus::EnAttenteValidation);

    let validated = update
        .execute(
            &MockAuth::regisseur(regisseur.id).identity,
            budget.id,
            UpdateBudgetInput {
                statut: Some(BudgetStatus::Valide),
                montant_valide: Some(400_000.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(validated.statut, BudgetStatus::Valide);
    assert_eq!(validated.montant_restant, budget.montant_total - 400_000.0);
    assert_eq!(audit.kinds(), vec![AuditKind::Update, AuditKind::Update]);
}

#[tokio::test]
async fn should_delete_budget_with_its_lines() {
    let centre = test_centre("CSU-KHG-01", None);
    let budget = test_budget("BUD-2025-001", centre.id, Uuid::now_v7());
    let budgets = MockBudgetRepo::new(vec![budget.clone()], vec![centre]);
    let audit = MockAuditRepo::empty();

    DeleteBudgetUseCase {
        budgets: budgets.clone(),
        audit: audit.clone(),
    }
    .execute(&MockAuth::admin().identity, budget.id)
    .await
    .unwrap();

    assert!(budgets.budgets.lock().unwrap().is_empty());
    assert_eq!(audit.kinds(), vec![AuditKind::Delete]);
}
