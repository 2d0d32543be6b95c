//! User-visible strings (Japanese locale).

/// Sign-in submitted with an empty field.
pub const MISSING_CREDENTIALS: &str = "メールアドレスとパスワードを入力してください。";
/// Sign-up submitted with an empty field.
pub const MISSING_REGISTRATION_FIELDS: &str = "すべての項目を入力してください。";
/// Sign-up with an email that already has an account.
pub const ALREADY_REGISTERED: &str =
    "このメールアドレスはすでに登録されています。別のメールアドレスで登録してください。";
/// Dog entry without name, breed or events.
pub const MISSING_DOG_FIELDS: &str = "犬名・犬種・参加種目は必須です。";
/// Update with an empty event list.
pub const NO_EVENTS_SELECTED: &str = "参加種目を1つ以上選択してください。";
/// Delete without confirmation.
pub const DELETE_NOT_CONFIRMED: &str = "削除する場合はチェックボックスを確認してください。";
/// Guarded page requested without a signed-in user.
pub const LOGIN_REQUIRED: &str = "ログインが必要です。トップページからログインしてください。";
/// Selected record no longer exists.
pub const RECORD_NOT_FOUND: &str = "選択された犬情報が見つかりません。";
/// Candidate score table does not match the displayed table.
pub const SCORE_SHAPE_MISMATCH: &str = "表の行数が一致しません。ページを再読み込みしてください。";
/// Snapshot written.
pub const SAVED: &str = "保存しました！";
/// Snapshot write failed.
pub const SAVE_FAILED: &str = "保存に失敗しました";
/// Snapshot read failed.
pub const LOAD_FAILED: &str = "読み込みに失敗しました";
/// Snapshot restored.
pub const LOADED: &str = "読み込みました。";

/// Password shorter than `min` characters.
#[must_use]
pub fn password_too_short(min: usize) -> String {
    format!("パスワードは{min}文字以上で入力してください。")
}

/// Owner already has `max` dogs.
#[must_use]
pub fn registration_cap(max: usize) -> String {
    format!("登録できる犬は最大 {max} 頭までです。")
}

/// Sign-in rejected by the provider.
#[must_use]
pub fn sign_in_failed(detail: &str) -> String {
    format!("ログインに失敗しました: {detail}")
}

/// Sign-up rejected by the provider.
#[must_use]
pub fn sign_up_failed(detail: &str) -> String {
    format!("登録に失敗しました: {detail}")
}

/// Greeting after sign-in or sign-up.
#[must_use]
pub fn welcome(name: &str) -> String {
    format!("ようこそ、{name} さん！")
}

/// Dog registered.
#[must_use]
pub fn dog_added(dog_name: &str) -> String {
    format!("「{dog_name}」を登録しました。")
}

/// Dog updated.
#[must_use]
pub fn dog_updated(dog_name: &str) -> String {
    format!("「{dog_name}」の情報を更新しました。")
}

/// Dog deleted.
#[must_use]
pub fn dog_deleted(dog_name: &str) -> String {
    format!("「{dog_name}」を削除しました。")
}

/// Registration counter shown above the forms.
#[must_use]
pub fn registered_count(count: usize, max: usize) -> String {
    format!("登録済み: {count} 頭 / 最大 {max} 頭")
}

/// Caption naming the signed-in user.
#[must_use]
pub fn signed_in_as(name: &str) -> String {
    format!("ログイン中: {name}")
}
