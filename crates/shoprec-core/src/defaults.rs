//! Centralized default constants for the shoprec system.
//!
//! **This module is the single source of truth** for all shared default
//! values: signal weights, score thresholds, keyword tables, climate
//! regions, and price brackets. All crates reference these constants
//! instead of defining their own magic numbers.

// =============================================================================
// RECOMMENDATION PARAMETERS
// =============================================================================

/// Default number of recommendations to return.
pub const DEFAULT_K: usize = 10;

/// Maximum number of recommendations allowed per request.
pub const MAX_K: usize = 50;

/// Minimum cosine similarity for a candidate to receive ranking bonuses.
/// Candidates with no resolvable embeddings are floored at this score
/// rather than dropped.
pub const MIN_SIMILARITY_SCORE: f32 = 0.1;

/// Number of cross-catalog representatives stored per merchant product.
pub const REPS_PER_PRODUCT: usize = 3;

/// Representative fetch size per category on cache miss. The full list
/// is cached; callers slice to their own limit.
pub const REPRESENTATIVE_FETCH_LIMIT: usize = 100;

/// Recency cap: most-recent purchased/cart items considered per request.
pub const MAX_PURCHASED_HISTORY: usize = 5;

/// Recency cap: most-recent viewed items considered per request.
pub const MAX_VIEWED_HISTORY: usize = 5;

// =============================================================================
// SIGNAL WEIGHTS
// =============================================================================

/// Weight for past purchases (highest: proven preferences).
pub const WEIGHT_PURCHASED: f32 = 0.7;

/// Weight for cart items (high: strong intent to buy).
pub const WEIGHT_CART: f32 = 0.5;

/// Weight for the currently viewed product.
pub const WEIGHT_CURRENT: f32 = 0.3;

/// Weight for recently viewed products (casual browsing).
pub const WEIGHT_VIEWED: f32 = 0.1;

// =============================================================================
// RANKING BONUSES
// =============================================================================

/// Tag-boost weight: bonus = weight x Jaccard(current tags, candidate tags).
pub const TAG_BOOST_WEIGHT: f32 = 0.15;

/// Price-proximity weight: bonus = weight x (1 - |price diff| / range).
pub const PRICE_PROXIMITY_WEIGHT: f32 = 0.10;

/// Price window as a fraction of the current product's price. Candidates
/// within +/-30% qualify for the proximity bonus (and the hard filter).
pub const PRICE_PROXIMITY_RANGE: f32 = 0.30;

// =============================================================================
// CATEGORY DETECTION
// =============================================================================

/// Classifier confidence at or above which the ML result is accepted
/// without cross-checking keywords.
pub const ML_CONFIDENCE_THRESHOLD: f32 = 0.6;

/// Confidence assigned to keyword-derived (or cross-checked) detections.
pub const KEYWORD_CONFIDENCE: f32 = 0.5;

/// Keyword tables per category, used by the keyword fallback scorer and
/// for weak-supervision training of the classifier oracle. A matched
/// phrase contributes its word count to the category score.
pub const BEAUTY_KEYWORDS: &[&str] = &[
    "skincare", "moisturizer", "serum", "cream", "lotion", "face", "skin",
    "beauty", "cosmetic", "makeup", "lipstick", "mascara", "foundation",
    "cleanser", "toner", "sunscreen", "spf", "anti-aging", "wrinkle",
    "hydrating", "facial", "eye cream", "night cream", "day cream",
    "exfoliant", "mask", "peel", "vitamin c", "retinol", "hyaluronic",
    "collagen", "niacinamide", "salicylic", "benzoyl", "acne", "blemish",
    "fragrance", "perfume", "cologne", "deodorant", "body wash", "shampoo",
    "conditioner", "hair", "nail", "polish", "manicure", "pedicure",
];

pub const FASHION_KEYWORDS: &[&str] = &[
    "clothing", "apparel", "shirt", "pants", "dress", "skirt", "coat",
    "jacket", "sweater", "hoodie", "jeans", "shorts", "blouse", "top",
    "bottom", "suit", "blazer", "cardigan", "vest", "polo", "tee",
    "t-shirt", "underwear", "socks", "shoes", "boots", "sneakers",
    "sandals", "heels", "flats", "loafers", "accessories", "belt",
    "scarf", "hat", "cap", "gloves", "bag", "purse", "handbag",
    "backpack", "wallet", "watch", "jewelry", "necklace", "bracelet",
    "earrings", "ring", "sunglasses", "winter", "summer", "wool",
    "cotton", "leather", "denim", "silk", "linen", "cashmere",
];

pub const ELECTRONICS_KEYWORDS: &[&str] = &[
    "phone", "smartphone", "iphone", "android", "samsung", "pixel",
    "tablet", "ipad", "laptop", "computer", "pc", "macbook", "desktop",
    "monitor", "keyboard", "mouse", "headphones", "earbuds", "airpods",
    "speaker", "bluetooth", "wireless", "charger", "cable", "adapter",
    "case", "cover", "screen protector", "stand", "dock", "hub",
    "usb", "hdmi", "power bank", "battery", "camera", "webcam",
    "microphone", "gaming", "controller", "console", "playstation",
    "xbox", "nintendo", "smart", "watch", "fitness", "tracker",
    "tv", "television", "streaming", "roku", "fire stick", "chromecast",
];

pub const HOME_KEYWORDS: &[&str] = &[
    "home", "house", "kitchen", "bedroom", "bathroom", "living room",
    "furniture", "decor", "decoration", "pillow", "cushion", "blanket",
    "throw", "rug", "carpet", "curtain", "blind", "lamp", "light",
    "candle", "vase", "frame", "mirror", "clock", "storage", "organizer",
    "shelf", "rack", "hook", "basket", "bin", "container", "jar",
    "plate", "bowl", "cup", "mug", "glass", "utensil", "cutlery",
    "pot", "pan", "cookware", "bakeware", "appliance", "blender",
    "mixer", "toaster", "coffee", "kettle", "towel", "mat", "shower",
    "soap", "dispenser", "trash", "laundry", "cleaning", "garden",
    "outdoor", "patio", "grill", "bbq", "plant", "planter", "tool",
];

// =============================================================================
// LOCATION / CLIMATE FILTERING
// =============================================================================

/// Region/country names treated as hot climates (substring match against
/// the normalized location string).
pub const HOT_CLIMATE_REGIONS: &[&str] = &[
    // South Asia
    "pakistan", "india", "bangladesh", "sri lanka", "nepal",
    // Middle East
    "uae", "united arab emirates", "saudi arabia", "qatar", "bahrain",
    "kuwait", "oman", "yemen", "jordan", "iraq",
    // Southeast Asia
    "thailand", "vietnam", "philippines", "indonesia", "malaysia",
    "singapore", "cambodia", "myanmar", "laos",
    // Africa
    "egypt", "nigeria", "kenya", "south africa", "morocco", "ghana",
    "ethiopia", "tanzania", "uganda", "senegal",
    // Americas
    "brazil", "mexico", "colombia", "venezuela", "peru", "ecuador",
    "cuba", "dominican republic", "puerto rico", "jamaica",
    // Oceania
    "australia", "fiji", "hawaii",
];

/// Region/country names treated as cold climates.
pub const COLD_CLIMATE_REGIONS: &[&str] = &[
    // North America
    "canada", "alaska",
    // Europe
    "uk", "united kingdom", "england", "scotland", "ireland",
    "norway", "sweden", "finland", "denmark", "iceland",
    "russia", "poland", "germany", "netherlands", "belgium",
    "switzerland", "austria", "czech republic",
    // Asia
    "japan", "south korea", "mongolia", "kazakhstan",
    // Southern hemisphere winter
    "argentina", "chile", "new zealand",
];

/// ISO 3166-1 alpha-2 codes for hot climates. Storefront localization
/// commonly sends bare country codes; kept lowercase to match the
/// normalized request value.
pub const HOT_CLIMATE_ISO_CODES: &[&str] = &[
    "pk", "in", "bd", "lk", "np",
    "ae", "sa", "qa", "bh", "kw", "om", "ye", "jo", "iq",
    "th", "vn", "ph", "id", "my", "sg", "kh", "mm", "la",
    "eg", "ng", "ke", "za", "ma", "gh", "et", "tz", "ug", "sn",
    "br", "mx", "co", "ve", "pe", "ec", "cu", "do", "pr", "jm",
    "au", "fj",
];

/// ISO 3166-1 alpha-2 codes for cold climates.
pub const COLD_CLIMATE_ISO_CODES: &[&str] = &[
    "ca", "gb", "ie",
    "no", "se", "fi", "dk", "is",
    "ru", "pl", "de", "nl", "be", "ch", "at", "cz",
    "jp", "kr", "mn", "kz",
    "ar", "cl", "nz",
];

/// Keywords marking winter items, excluded for hot-climate users.
pub const WINTER_KEYWORDS: &[&str] = &[
    "winter", "wool", "snow", "cold", "warm", "thermal", "fleece",
    "parka", "down jacket", "heavy coat", "fur", "cashmere",
    "beanie", "mittens", "scarf", "earmuffs", "boots",
];

/// Keywords marking summer-only items, excluded for cold-climate users.
pub const SUMMER_KEYWORDS: &[&str] = &[
    "summer", "beach", "swimwear", "bikini", "swimsuit", "pool",
    "tropical", "cooling", "lightweight", "sleeveless", "shorts",
    "sandals", "flip flops", "tank top", "sunhat", "visor",
];

// =============================================================================
// ETHICAL / PREFERENCE FILTERS
// =============================================================================

/// Keywords qualifying a product as vegan/cruelty-free.
pub const VEGAN_KEYWORDS: &[&str] = &[
    "vegan", "cruelty-free", "cruelty free", "plant-based", "plant based",
    "no animal", "animal-free", "not tested on animals", "peta approved",
    "leaping bunny", "vegan friendly", "100% vegan",
];

/// Keywords qualifying a product as sustainable/eco-friendly.
pub const SUSTAINABLE_KEYWORDS: &[&str] = &[
    "sustainable", "eco-friendly", "eco friendly", "organic", "recycled",
    "biodegradable", "compostable", "zero waste", "plastic-free",
    "fair trade", "ethically sourced", "carbon neutral", "renewable",
    "upcycled", "natural", "green", "environmentally friendly",
    "earth friendly", "b corp", "certified organic",
];

// =============================================================================
// PRICE BRACKETS
// =============================================================================

/// Inclusive bounds for the "low" price bracket.
pub const PRICE_LOW: (f32, f32) = (0.0, 50.0);

/// Inclusive bounds for the "medium" price bracket.
pub const PRICE_MEDIUM: (f32, f32) = (20.0, 100.0);

/// Inclusive bounds for the "high" price bracket (no upper limit).
pub const PRICE_HIGH: (f32, f32) = (100.0, f32::INFINITY);

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 5001;
