use std::{fs, sync::Arc};

use kyc_core::{
    DraftPersistence, KeyValueStore, StaticCampCatalog, ValidationMode, Wizard, DRAFT_KEY,
    STEP_KEY,
};
use kyc_domain::{DraftPatch, PersonalInfo, WizardStep};
use kyc_storage_json::{JsonFileStore, STORE_FILE_NAME};
use tempfile::tempdir;

#[test]
fn json_store_sets_gets_and_removes_keys() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::in_dir(dir.path()).expect("create store");

    assert_eq!(store.get("missing").expect("get"), None);
    store.set("alpha", "1").expect("set alpha");
    store.set("beta", "two").expect("set beta");
    assert_eq!(store.get("alpha").expect("get").as_deref(), Some("1"));

    store.remove("alpha").expect("remove alpha");
    assert_eq!(store.get("alpha").expect("get"), None);
    assert_eq!(store.get("beta").expect("get").as_deref(), Some("two"));
    assert_eq!(store.path(), dir.path().join(STORE_FILE_NAME));
}

#[test]
fn removing_last_key_deletes_file() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::in_dir(dir.path()).expect("create store");
    store.set(STEP_KEY, "3").expect("set");
    assert!(store.path().exists());

    store.remove(STEP_KEY).expect("remove");
    assert!(!store.path().exists());
    store.remove(STEP_KEY).expect("second remove is a no-op");
}

#[test]
fn set_many_writes_keys_together_and_keeps_others() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::in_dir(dir.path()).expect("create store");
    store.set("theme", "dark").expect("set unrelated key");

    store
        .set_many(&[(DRAFT_KEY, "{}"), (STEP_KEY, "4")])
        .expect("set many");

    let entries = store.entries().expect("entries");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries.get(STEP_KEY).map(String::as_str), Some("4"));
    assert_eq!(entries.get(DRAFT_KEY).map(String::as_str), Some("{}"));
    assert_eq!(entries.get("theme").map(String::as_str), Some("dark"));
}

#[test]
fn values_survive_a_new_store_instance() {
    let dir = tempdir().expect("tempdir");
    JsonFileStore::in_dir(dir.path())
        .expect("create store")
        .set(DRAFT_KEY, "{\"consent\":{\"agreedToTerms\":true}}")
        .expect("set");

    let reopened = JsonFileStore::in_dir(dir.path()).expect("reopen store");
    let raw = reopened.get(DRAFT_KEY).expect("get").expect("value present");
    assert!(raw.contains("agreedToTerms"));
    assert!(!dir.path().join(format!("{STORE_FILE_NAME}.tmp")).exists());
}

#[test]
fn corrupt_file_is_reported_on_read_and_replaced_on_write() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::in_dir(dir.path()).expect("create store");
    fs::write(store.path(), "{oops").expect("write corrupt file");

    assert!(store.get(DRAFT_KEY).is_err());
    store.set(STEP_KEY, "2").expect("set replaces corrupt file");
    assert_eq!(store.get(STEP_KEY).expect("get").as_deref(), Some("2"));

    let quarantined = fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().contains("corrupt-"))
        .count();
    assert_eq!(quarantined, 1);
}

#[test]
fn wizard_resumes_from_file_store() {
    let dir = tempdir().expect("tempdir");
    let catalog = Arc::new(StaticCampCatalog::default());
    {
        let store = JsonFileStore::in_dir(dir.path()).expect("create store");
        let mut wizard = Wizard::mount(
            DraftPersistence::new(store),
            catalog.clone(),
            ValidationMode::Relaxed,
        );
        wizard.update(DraftPatch::personal_info(PersonalInfo {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "j@x.io".into(),
            phone: "+1".into(),
            date_of_birth: "1990-01-01".into(),
            nationality: "US".into(),
            passport_number: "P1".into(),
            passport_expiry: "2030-01-01".into(),
        }));
        wizard.next();
    }

    let store = JsonFileStore::in_dir(dir.path()).expect("reopen store");
    let wizard = Wizard::mount(DraftPersistence::new(store), catalog, ValidationMode::Relaxed);
    assert!(wizard.resumed());
    assert_eq!(wizard.current_step(), WizardStep::TravelDetails);
    let info = wizard
        .state()
        .form_data
        .personal_info
        .as_ref()
        .expect("personal info restored");
    assert_eq!(info.first_name, "Jane");
}
