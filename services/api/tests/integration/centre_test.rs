use uuid::Uuid;

use cgcs_api::error::ApiError;
use cgcs_api::domain::types::ChefCentreFilter;
use cgcs_api::usecase::centre::{
    CreateCentreInput, CreateCentreUseCase, DeleteCentreUseCase, GetCentreUseCase,
    UpdateCentreInput, UpdateCentreUseCase,
};
use cgcs_api::usecase::chef_centre::ListChefsCentresUseCase;
use cgcs_api::usecase::regisseur::{DeleteRegisseurUseCase, GetRegisseurUseCase};
use cgcs_domain::audit::AuditKind;
use cgcs_domain::pagination::PageRequest;
use cgcs_domain::user::UserRole;

use crate::helpers::{
    MockAuditRepo, MockCentreRepo, MockRegisseurRepo, MockUserRepo, test_centre, test_regisseur,
    test_user,
};

fn input(code: &str, regisseur_id: Option<Uuid>) -> CreateCentreInput {
    CreateCentreInput {
        code: code.to_owned(),
        nom: "CSU Korhogo Nord".to_owned(),
        adresse: Some("Quartier Soba".to_owned()),
        ville: Some("Korhogo".to_owned()),
        commune: None,
        departement: Some("Korhogo".to_owned()),
        region: "Poro".to_owned(),
        type_centre: "CSU".to_owned(),
        niveau: Some("1".to_owned()),
        telephone: None,
        active: None,
        regisseur_id,
    }
}

#[tokio::test]
async fn should_read_back_created_centre_with_its_chef() {
    let regisseur = test_regisseur("REG-PORO");
    let centres = MockCentreRepo::empty();
    let audit = MockAuditRepo::empty();
    let create = CreateCentreUseCase {
        centres: centres.clone(),
        regisseurs: MockRegisseurRepo::new(vec![regisseur.clone()]),
        audit: audit.clone(),
    };

    let created = create
        .execute(Uuid::now_v7(), input("CSU-KHG-01", Some(regisseur.id)))
        .await
        .unwrap();

    let mut chef = test_user("chef@cgcs.ci", "motdepasse1", UserRole::ChefCentre);
    chef.centre_id = Some(created.id);
    let get = GetCentreUseCase {
        centres: centres.clone(),
        users: MockUserRepo::new(vec![chef.clone()]),
    };
    let detail = get.execute(created.id).await.unwrap();

    assert_eq!(detail.centre.code, "CSU-KHG-01");
    assert_eq!(detail.centre.nom, created.nom);
    assert_eq!(detail.centre.regisseur_id, Some(regisseur.id));
    assert!(detail.centre.active);
    assert_eq!(detail.chef_centre.map(|c| c.id), Some(chef.id));
    assert_eq!(audit.kinds(), vec![AuditKind::Create]);
}

#[tokio::test]
async fn should_reject_centre_for_unknown_regisseur() {
    let create = CreateCentreUseCase {
        centres: MockCentreRepo::empty(),
        regisseurs: MockRegisseurRepo::empty(),
        audit: MockAuditRepo::empty(),
    };

    let err = create
        .execute(Uuid::now_v7(), input("CSU-KHG-01", Some(Uuid::now_v7())))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::RegisseurNotFound));
}

#[tokio::test]
async fn should_reject_duplicate_centre_code() {
    let existing = test_centre("CSU-KHG-01", None);
    let create = CreateCentreUseCase {
        centres: MockCentreRepo::new(vec![existing]),
        regisseurs: MockRegisseurRepo::empty(),
        audit: MockAuditRepo::empty(),
    };

    let err = create
        .execute(Uuid::now_v7(), input("CSU-KHG-01", None))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::CodeAlreadyExists));
}

#[tokio::test]
async fn should_reattach_chef_when_centre_changes_regisseur() {
    let old_regisseur = test_regisseur("REG-PORO");
    let new_regisseur = test_regisseur("REG-TCHOLOGO");
    let centre = test_centre("CSU-KHG-01", Some(old_regisseur.id));
    let mut chef = test_user("chef@cgcs.ci", "motdepasse1", UserRole::ChefCentre);
    chef.centre_id = Some(centre.id);
    chef.regisseur_id = Some(old_regisseur.id);
    let users = MockUserRepo::new(vec![chef.clone()]);
    let update = UpdateCentreUseCase {
        centres: MockCentreRepo::new(vec![centre.clone()]),
        regisseurs: MockRegisseurRepo::new(vec![old_regisseur.clone(), new_regisseur.clone()]),
        users: users.clone(),
        audit: MockAuditRepo::empty(),
    };

    let updated = update
        .execute(
            Uuid::now_v7(),
            centre.id,
            UpdateCentreInput {
                regisseur_id: Some(new_regisseur.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.regisseur_id, Some(new_regisseur.id));
    assert_eq!(
        users.get(chef.id).and_then(|u| u.regisseur_id),
        Some(new_regisseur.id)
    );
    let under_new = ListChefsCentresUseCase {
        users: users.clone(),
    }
    .execute(
        ChefCentreFilter {
            regisseur_id: Some(new_regisseur.id),
            ..Default::default()
        },
        PageRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(under_new.len(), 1);
}

#[tokio::test]
async fn should_keep_centre_still_referenced() {
    let centre = test_centre("CSU-KHG-01", None);
    let mut centres = MockCentreRepo::new(vec![centre.clone()]);
    centres.referenced.push(centre.id);
    let audit = MockAuditRepo::empty();
    let delete = DeleteCentreUseCase {
        centres: centres.clone(),
        audit: audit.clone(),
    };

    let err = delete.execute(Uuid::now_v7(), centre.id).await.unwrap_err();

    assert!(matches!(err, ApiError::EntityInUse));
    assert_eq!(centres.centres.lock().unwrap().len(), 1);
    assert!(audit.kinds().is_empty());
}

#[tokio::test]
async fn should_delete_unreferenced_centre() {
    let centre = test_centre("CSU-KHG-01", None);
    let centres = MockCentreRepo::new(vec![centre.clone()]);
    let audit = MockAuditRepo::empty();
    let delete = DeleteCentreUseCase {
        centres: centres.clone(),
        audit: audit.clone(),
    };

    delete.execute(Uuid::now_v7(), centre.id).await.unwrap();

    assert!(centres.centres.lock().unwrap().is_empty());
    assert_eq!(audit.kinds(), vec![AuditKind::Delete]);

    let again = delete.execute(Uuid::now_v7(), centre.id).await.unwrap_err();
    assert!(matches!(again, ApiError::CentreNotFound));
}

#[tokio::test]
async fn should_keep_regisseur_supervising_centres() {
    let regisseur = test_regisseur("REG-PORO");
    let mut regisseurs = MockRegisseurRepo::new(vec![regisseur.clone()]);
    regisseurs.centre_counts.push((regisseur.id, 3));

    let detail = GetRegisseurUseCase {
        regisseurs: regisseurs.clone(),
    }
    .execute(regisseur.id)
    .await
    .unwrap();
    assert_eq!(detail.centre_count, 3);

    let err = DeleteRegisseurUseCase {
        regisseurs: regisseurs.clone(),
        audit: MockAuditRepo::empty(),
    }
    .execute(Uuid::now_v7(), regisseur.id)
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::EntityInUse));
}
