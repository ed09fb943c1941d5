pub const WHEEL_ROOT: &str = "spin-wheel flex flex-col items-center gap-4 w-full";
pub const WHEEL_WRAPPER: &str = "wheel-wrapper relative w-full max-w-[480px] mx-auto";
pub const WHEEL_CANVAS: &str = "spin-wheel__canvas block mx-auto";
pub const WHEEL_FALLBACK: &str = "spin-wheel__fallback rounded-lg border border-gray-200 p-4 text-center text-gray-700";
pub const WHEEL_POINTER: &str = "spin-wheel__pointer absolute left-1/2 -top-2 -translate-x-1/2 w-0 h-0 border-x-[12px] border-x-transparent border-t-[22px] border-t-red-600 drop-shadow";

pub const SPIN_BUTTON: &str = "spin-wheel__button inline-flex items-center justify-center px-6 py-3 rounded-full font-semibold text-white bg-gradient-to-r from-amber-500 to-orange-600 hover:from-amber-600 hover:to-orange-700 shadow-lg transition-all duration-300";
pub const SPIN_BUTTON_DISABLED: &str = "spin-wheel__button inline-flex items-center justify-center px-6 py-3 rounded-full font-semibold text-white bg-gray-400 cursor-not-allowed opacity-70";

pub const RESULT: &str = "spin-wheel__result min-h-[1.5rem] text-lg font-bold text-center text-gray-900";
pub const RESULT_LINK: &str = "spin-wheel__link text-blue-600 hover:text-blue-700 underline transition-colors";
pub const COUPON: &str = "spin-wheel__coupon flex flex-col items-center gap-1 text-center text-gray-700";

pub const LEGEND: &str = "spin-wheel__legend flex flex-wrap justify-center gap-2 text-sm";
pub const LEGEND_ITEM: &str = "spin-wheel__legend-item inline-flex items-center gap-2";
pub const LEGEND_SWATCH: &str = "spin-wheel__legend-swatch inline-block w-4 h-4 rounded-sm border border-gray-300";

pub const MILESTONE_TRACK: &str = "spin-wheel__milestone-track w-full h-3 rounded-full bg-gray-200 overflow-hidden";
pub const MILESTONE_FILL: &str = "spin-wheel__milestone-fill h-full bg-gradient-to-r from-emerald-400 to-emerald-600 transition-all duration-500";
pub const MILESTONE_LABEL: &str = "spin-wheel__milestone-label text-sm text-gray-600";
pub const MILESTONE_LIST: &str = "spin-wheel__milestones flex flex-col gap-1 text-sm w-full";
pub const MILESTONE_ENTRY: &str = "spin-wheel__milestone flex justify-between text-gray-600";
pub const MILESTONE_ENTRY_ACHIEVED: &str = "spin-wheel__milestone flex justify-between text-emerald-700 font-semibold";
pub const COUPON_MILESTONE: &str = "spin-wheel__coupon-milestone mt-2 rounded-lg border border-emerald-200 bg-emerald-50 px-3 py-2 text-emerald-800";
pub const COUNTDOWN: &str = "spin-wheel__countdown font-mono tabular-nums";
