/// Country code to (city code, city name) pairs used in tunnel file names.
static CITIES: &[(&str, &[(&str, &str)])] = &[
    ("al", &[("tia", "Tirana"), ("dur", "Durrës"), ("shk", "Shkodër")]),
    ("at", &[("vie", "Vienna"), ("graz", "Graz"), ("lnz", "Linz")]),
    (
        "au",
        &[
            ("adl", "Adelaide"),
            ("bne", "Brisbane"),
            ("mel", "Melbourne"),
            ("per", "Perth"),
            ("syd", "Sydney"),
            ("cbr", "Canberra"),
        ],
    ),
    ("be", &[("bru", "Brussels"), ("ant", "Antwerp")]),
    ("bg", &[("sof", "Sofia"), ("pld", "Plovdiv")]),
    ("br", &[("for", "Fortaleza"), ("sao", "São Paulo"), ("rio", "Rio de Janeiro")]),
    (
        "ca",
        &[
            ("mtr", "Montreal"),
            ("tor", "Toronto"),
            ("van", "Vancouver"),
            ("yyc", "Calgary"),
            ("ott", "Ottawa"),
            ("edm", "Edmonton"),
        ],
    ),
    ("ch", &[("zrh", "Zurich"), ("gen", "Geneva")]),
    ("cl", &[("scl", "Santiago"), ("vap", "Valparaíso")]),
    ("co", &[("bog", "Bogotá"), ("med", "Medellín")]),
    ("cy", &[("nic", "Nicosia")]),
    ("cz", &[("prg", "Prague"), ("brn", "Brno")]),
    (
        "de",
        &[
            ("ber", "Berlin"),
            ("dus", "Düsseldorf"),
            ("fra", "Frankfurt"),
            ("ham", "Hamburg"),
            ("mun", "Munich"),
        ],
    ),
    ("dk", &[("cph", "Copenhagen")]),
    ("ee", &[("tll", "Tallinn")]),
    (
        "es",
        &[
            ("bcn", "Barcelona"),
            ("mad", "Madrid"),
            ("vlc", "Valencia"),
            ("sev", "Seville"),
            ("bil", "Bilbao"),
        ],
    ),
    ("fi", &[("hel", "Helsinki")]),
    (
        "fr",
        &[
            ("bod", "Bordeaux"),
            ("mrs", "Marseille"),
            ("par", "Paris"),
            ("lyo", "Lyon"),
            ("nic", "Nice"),
        ],
    ),
    (
        "gb",
        &[
            ("glw", "Glasgow"),
            ("lon", "London"),
            ("mnc", "Manchester"),
            ("birm", "Birmingham"),
            ("lee", "Leeds"),
        ],
    ),
    ("gr", &[("ath", "Athens"), ("thes", "Thessaloniki")]),
    ("hk", &[("hkg", "Hong Kong")]),
    ("hr", &[("zag", "Zagreb")]),
    ("hu", &[("bud", "Budapest")]),
    ("id", &[("jpu", "Jakarta")]),
    ("ie", &[("dub", "Dublin")]),
    ("il", &[("tlv", "Tel Aviv")]),
    ("it", &[("mil", "Milan"), ("pmo", "Palermo"), ("rom", "Rome")]),
    ("jp", &[("osa", "Osaka"), ("tyo", "Tokyo"), ("nag", "Nagoya")]),
    ("mx", &[("qro", "Querétaro")]),
    ("my", &[("kul", "Kuala Lumpur")]),
    ("ng", &[("los", "Lagos")]),
    ("nl", &[("ams", "Amsterdam"), ("rot", "Rotterdam")]),
    ("no", &[("osl", "Oslo"), ("svg", "Stavanger"), ("bgo", "Bergen")]),
    ("nz", &[("akl", "Auckland")]),
    ("pe", &[("lim", "Lima")]),
    ("ph", &[("mnl", "Manila")]),
    ("pl", &[("waw", "Warsaw")]),
    ("pt", &[("lis", "Lisbon")]),
    ("ro", &[("buh", "Bucharest")]),
    ("rs", &[("beg", "Belgrade")]),
    (
        "se",
        &[
            ("got", "Gothenburg"),
            ("mma", "Malmö"),
            ("sto", "Stockholm"),
            ("upp", "Uppsala"),
        ],
    ),
    ("sg", &[("sin", "Singapore")]),
    ("si", &[("lju", "Ljubljana")]),
    ("sk", &[("bts", "Bratislava")]),
    ("th", &[("bkk", "Bangkok")]),
    ("tr", &[("ist", "Istanbul")]),
    ("ua", &[("iev", "Kyiv")]),
    (
        "us",
        &[
            ("atl", "Atlanta"),
            ("bos", "Boston"),
            ("chi", "Chicago"),
            ("dal", "Dallas"),
            ("den", "Denver"),
            ("det", "Detroit"),
            ("hou", "Houston"),
            ("lax", "Los Angeles"),
            ("mia", "Miami"),
            ("mkc", "Kansas City"),
            ("nyc", "New York"),
            ("phx", "Phoenix"),
            ("qas", "Ashburn"),
            ("rag", "Raleigh"),
            ("sea", "Seattle"),
            ("sjc", "San Jose"),
            ("slc", "Salt Lake City"),
            ("txc", "Texas"),
            ("uyk", "Secaucus"),
            ("was", "Washington"),
        ],
    ),
    ("za", &[("jnb", "Johannesburg")]),
];

/// Display name for a city code within a country; uppercased code if unknown.
pub fn city_name(country_code: &str, city_code: &str) -> String {
    let country = country_code.trim().to_lowercase();
    let city = city_code.trim().to_lowercase();
    CITIES
        .iter()
        .find(|(code, _)| *code == country)
        .and_then(|(_, cities)| cities.iter().find(|(code, _)| *code == city))
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| city_code.trim().to_uppercase())
}
