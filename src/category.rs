use crate::locale::Locale;

// (code, Romanian, English)
const CATEGORIES: [(&str, &str, &str); 20] = [
    ("001", "Locuri Istorice și Culturale", "Historical and Cultural Sites"),
    ("002", "Muzee și Galerii de Artă", "Museums and Art Galleries"),
    ("003", "Parcuri Naturale și Rezervații", "Natural Parks and Reserves"),
    ("004", "Plaje și Zone de Coastă", "Beaches and Coastal Areas"),
    ("005", "Zone Montane și de Aventură", "Mountain and Adventure Areas"),
    ("006", "Locuri de Recreere și Divertisment", "Recreation and Entertainment Places"),
    ("007", "Zone Urbane și Arhitecturale", "Urban and Architectural Areas"),
    ("008", "Centre Comerciale și Piețe", "Shopping Centers and Markets"),
    ("009", "Evenimente Culturale și Festivaluri", "Cultural Events and Festivals"),
    ("010", "Patrimoniu Gastronomic și Vinicol", "Gastronomic and Wine Heritage"),
    ("011", "Tururi Ghidate și Experiențe Locale", "Guided Tours and Local Experiences"),
    ("012", "Destinații Spirituale și Religioase", "Spiritual and Religious Destinations"),
    ("013", "Atracții Ecoturistice", "Ecotourism Attractions"),
    ("014", "Atracții Educaționale și Științifice", "Educational and Scientific Attractions"),
    ("015", "Situri UNESCO și Patrimoniu Mondial", "UNESCO Sites and World Heritage"),
    ("016", "Experiențe de Navigație și Croaziere", "Navigation and Cruise Experiences"),
    ("017", "Atracții de Artă Stradală și Cultură Urbană", "Street Art and Urban Culture Attractions"),
    ("018", "Sate și Comunități Tradiționale", "Traditional Villages and Communities"),
    ("019", "Tururi Gastronomice și Degustări", "Gastronomic Tours and Tastings"),
    ("020", "Activități de Aventură și Sportive", "Adventure and Sports Activities"),
];

/// Display name of a category code. Unknown codes are shown as they are.
pub fn category_name(code: &str, locale: Locale) -> &str {
    CATEGORIES.iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, ro, en)| locale.pick(ro, en))
        .unwrap_or(code)
}
