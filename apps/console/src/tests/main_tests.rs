use super::*;

#[test]
fn birthday_shows_day_and_month_name() {
    let birthday = NaiveDate::from_ymd_opt(1992, 6, 12).expect("date");
    assert_eq!(birthday_label(birthday), "12 Junio");
}

#[test]
fn client_row_prints_backend_document_code() {
    let mut client = client_core::sample::clients().remove(0);
    client.type_document = "RUC".into();

    let row = render_client(&client);

    assert!(row.contains("RUC"));
    assert!(row.contains("12 Junio"));
}
