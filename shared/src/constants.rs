pub const DEFAULT_SEGMENT_COLOR: &str = "#ffe082";
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

pub const SPIN_DURATION_MS: f64 = 5000.0;
pub const SPIN_FULL_TURNS: f64 = 5.0;
pub const COUNTDOWN_TICK_MS: u32 = 250;

pub const AUTH_REQUIRED_MESSAGE: &str = "Моля, влезте в профила си.";
pub const RETRY_TOMORROW_MESSAGE: &str = "Опитай отново утре.";
pub const SIGN_IN_LINK_TEXT: &str = "Влез";
pub const SIGN_UP_LINK_TEXT: &str = "Регистрация";

pub const COUPON_PREFIX: &str = "Код за отстъпка: ";
pub const FREE_SHIPPING_TEXT: &str = "Спечели: Безплатна доставка за следваща поръчка.";
pub const MYSTERY_BOX_PREFIX: &str = "Спечели: Mystery Box при поръчка над ";
pub const MILESTONE_PREFIX: &str = "Милестон награда";
pub const MILESTONE_SPINS_WORD: &str = "завъртания";

pub const SPIN_BUTTON_LABEL: &str = "Завърти";
