//! Identita týmů: kanonické ESPN kódy, aliasy z jiných zdrojů, ruské názvy.

/// Russian display names keyed by canonical ESPN abbreviation.
pub const RU_BY_ABBR: &[(&str, &str)] = &[
    ("ATL", "Атланта Хокс"),
    ("BOS", "Бостон Селтикс"),
    ("BKN", "Бруклин Нетс"),
    ("CHA", "Шарлотт Хорнетс"),
    ("CHI", "Чикаго Буллз"),
    ("CLE", "Кливленд Кавальерс"),
    ("DAL", "Даллас Маверикс"),
    ("DEN", "Денвер Наггетс"),
    ("DET", "Детройт Пистонс"),
    ("GSW", "Голден Стэйт Уорриорз"),
    ("HOU", "Хьюстон Рокетс"),
    ("IND", "Индиана Пэйсерс"),
    ("LAC", "Лос-Анджелес Клипперс"),
    ("LAL", "Лос-Анджелес Лейкерс"),
    ("MEM", "Мемфис Гриззлис"),
    ("MIA", "Майами Хит"),
    ("MIL", "Милуоки Бакс"),
    ("MIN", "Миннесота Тимбервулвз"),
    ("NOP", "Нью-Орлеан Пеликанс"),
    ("NYK", "Нью-Йорк Никс"),
    ("OKC", "Оклахома-Сити Тандер"),
    ("ORL", "Орландо Мэджик"),
    ("PHI", "Филадельфия 76ерс"),
    ("PHX", "Финикс Санз"),
    ("POR", "Портленд Трэйл Блэйзерс"),
    ("SAC", "Сакраменто Кингз"),
    ("SAS", "Сан-Антонио Спёрс"),
    ("TOR", "Торонто Рэпторс"),
    ("UTA", "Юта Джаз"),
    ("WAS", "Вашингтон Уизардс"),
];

/// English full names keyed by canonical abbreviation. Used to resolve teams
/// from sources that only expose a name (HTML tables, link text).
pub const NAME_BY_ABBR: &[(&str, &str)] = &[
    ("ATL", "Atlanta Hawks"),
    ("BOS", "Boston Celtics"),
    ("BKN", "Brooklyn Nets"),
    ("CHA", "Charlotte Hornets"),
    ("CHI", "Chicago Bulls"),
    ("CLE", "Cleveland Cavaliers"),
    ("DAL", "Dallas Mavericks"),
    ("DEN", "Denver Nuggets"),
    ("DET", "Detroit Pistons"),
    ("GSW", "Golden State Warriors"),
    ("HOU", "Houston Rockets"),
    ("IND", "Indiana Pacers"),
    ("LAC", "LA Clippers"),
    ("LAL", "Los Angeles Lakers"),
    ("MEM", "Memphis Grizzlies"),
    ("MIA", "Miami Heat"),
    ("MIL", "Milwaukee Bucks"),
    ("MIN", "Minnesota Timberwolves"),
    ("NOP", "New Orleans Pelicans"),
    ("NYK", "New York Knicks"),
    ("OKC", "Oklahoma City Thunder"),
    ("ORL", "Orlando Magic"),
    ("PHI", "Philadelphia 76ers"),
    ("PHX", "Phoenix Suns"),
    ("POR", "Portland Trail Blazers"),
    ("SAC", "Sacramento Kings"),
    ("SAS", "San Antonio Spurs"),
    ("TOR", "Toronto Raptors"),
    ("UTA", "Utah Jazz"),
    ("WAS", "Washington Wizards"),
];

/// Basketball-Reference uses a few codes of its own.
const BBR_TO_ESPN: &[(&str, &str)] = &[
    ("BRK", "BKN"),
    ("PHO", "PHX"),
    ("CHO", "CHA"),
];

/// Short variants ESPN occasionally returns instead of the 3-letter code.
const VARIANT_TO_ESPN: &[(&str, &str)] = &[
    ("NO", "NOP"),
    ("NY", "NYK"),
    ("GS", "GSW"),
    ("SA", "SAS"),
    ("UTAH", "UTA"),
    ("WSH", "WAS"),
];

/// Normalize any known abbreviation variant to the canonical ESPN code.
/// Idempotent: a canonical code passes through unchanged.
pub fn canonical_abbr(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    for (from, to) in VARIANT_TO_ESPN.iter().chain(BBR_TO_ESPN) {
        if upper == *from {
            return (*to).to_string();
        }
    }
    upper
}

/// Russian name for a canonical code, if we know the team.
pub fn ru_name(abbr: &str) -> Option<&'static str> {
    RU_BY_ABBR.iter().find(|(a, _)| *a == abbr).map(|(_, n)| *n)
}

/// Lowercased alphanumeric-only key for fuzzy name matching across sources.
pub fn name_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Nicknames, one per team, used to bridge city-name variants like
/// "Los Angeles Clippers" vs "LA Clippers". All unique within the league.
const NICKNAMES: &[&str] = &[
    "hawks", "celtics", "nets", "hornets", "bulls", "cavaliers",
    "mavericks", "nuggets", "pistons", "warriors", "rockets", "pacers",
    "clippers", "lakers", "grizzlies", "heat", "bucks", "timberwolves",
    "pelicans", "knicks", "thunder", "magic", "76ers", "suns",
    "trailblazers", "kings", "spurs", "raptors", "jazz", "wizards",
];

/// Resolve a team by (English) display name, tolerant to punctuation and
/// city-name variants.
pub fn abbr_for_name(name: &str) -> Option<&'static str> {
    let key = name_key(name);
    if key.is_empty() {
        return None;
    }
    if let Some(&(abbr, _)) = NAME_BY_ABBR.iter().find(|(_, full)| name_key(full) == key) {
        return Some(abbr);
    }
    // Longest nickname suffix wins, so "…hornets" is not shadowed by "nets".
    let nick = NICKNAMES
        .iter()
        .filter(|n| key.ends_with(*n))
        .max_by_key(|n| n.len())?;
    NAME_BY_ABBR
        .iter()
        .find(|(_, full)| name_key(full).ends_with(nick))
        .map(|(abbr, _)| *abbr)
}
