//! Static HSN classification registry
//!
//! Holds the two-digit chapter table and a curated set of 4, 6 and 8 digit
//! HSN codes with their recommended GST rate, compensation cess and usual
//! unit. Lookups fall back from the exact code to the longest registered
//! prefix.

use bigdecimal::BigDecimal;
use serde::Serialize;

use crate::types::HsnCode;
use crate::utils::from_hundredths;

/// Metadata of a two-digit HSN chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChapterInfo {
    pub code: &'static str,
    pub description: &'static str,
    /// Customs tariff section (Roman numeral), `SAC` for services
    pub section: &'static str,
}

const fn ch(code: &'static str, section: &'static str, description: &'static str) -> ChapterInfo {
    ChapterInfo {
        code,
        description,
        section,
    }
}

/// Chapters 01-98 of the tariff (77 is reserved) plus 99 for services
static CHAPTERS: &[ChapterInfo] = &[
    ch("01", "I", "Live animals"),
    ch("02", "I", "Meat and edible meat offal"),
    ch("03", "I", "Fish and crustaceans, molluscs and other aquatic invertebrates"),
    ch("04", "I", "Dairy produce; birds' eggs; natural honey"),
    ch("05", "I", "Products of animal origin, not elsewhere specified"),
    ch("06", "II", "Live trees and other plants; cut flowers"),
    ch("07", "II", "Edible vegetables and certain roots and tubers"),
    ch("08", "II", "Edible fruit and nuts; peel of citrus fruit or melons"),
    ch("09", "II", "Coffee, tea, mate and spices"),
    ch("10", "II", "Cereals"),
    ch("11", "II", "Products of the milling industry; malt; starches"),
    ch("12", "II", "Oil seeds and oleaginous fruits; industrial or medicinal plants"),
    ch("13", "II", "Lac; gums, resins and other vegetable saps and extracts"),
    ch("14", "II", "Vegetable plaiting materials"),
    ch("15", "III", "Animal or vegetable fats and oils"),
    ch("16", "IV", "Preparations of meat, fish or crustaceans"),
    ch("17", "IV", "Sugars and sugar confectionery"),
    ch("18", "IV", "Cocoa and cocoa preparations"),
    ch("19", "IV", "Preparations of cereals, flour, starch or milk; pastrycooks' products"),
    ch("20", "IV", "Preparations of vegetables, fruit, nuts or other parts of plants"),
    ch("21", "IV", "Miscellaneous edible preparations"),
    ch("22", "IV", "Beverages, spirits and vinegar"),
    ch("23", "IV", "Residues and waste from the food industries; animal fodder"),
    ch("24", "IV", "Tobacco and manufactured tobacco substitutes"),
    ch("25", "V", "Salt; sulphur; earths and stone; plastering materials, lime and cement"),
    ch("26", "V", "Ores, slag and ash"),
    ch("27", "V", "Mineral fuels, mineral oils and products of their distillation"),
    ch("28", "VI", "Inorganic chemicals; compounds of precious metals"),
    ch("29", "VI", "Organic chemicals"),
    ch("30", "VI", "Pharmaceutical products"),
    ch("31", "VI", "Fertilisers"),
    ch("32", "VI", "Tanning or dyeing extracts; paints and varnishes; inks"),
    ch("33", "VI", "Essential oils and resinoids; perfumery, cosmetic or toilet preparations"),
    ch("34", "VI", "Soap, washing preparations, lubricating preparations, waxes"),
    ch("35", "VI", "Albuminoidal substances; modified starches; glues; enzymes"),
    ch("36", "VI", "Explosives; pyrotechnic products; matches"),
    ch("37", "VI", "Photographic or cinematographic goods"),
    ch("38", "VI", "Miscellaneous chemical products"),
    ch("39", "VII", "Plastics and articles thereof"),
    ch("40", "VII", "Rubber and articles thereof"),
    ch("41", "VIII", "Raw hides and skins (other than furskins) and leather"),
    ch("42", "VIII", "Articles of leather; saddlery; travel goods, handbags"),
    ch("43", "VIII", "Furskins and artificial fur; manufactures thereof"),
    ch("44", "IX", "Wood and articles of wood; wood charcoal"),
    ch("45", "IX", "Cork and articles of cork"),
    ch("46", "IX", "Manufactures of straw, of esparto or of other plaiting materials"),
    ch("47", "X", "Pulp of wood or of other fibrous cellulosic material; recovered paper"),
    ch("48", "X", "Paper and paperboard; articles of paper pulp, of paper or of paperboard"),
    ch("49", "X", "Printed books, newspapers, pictures and other printed products"),
    ch("50", "XI", "Silk"),
    ch("51", "XI", "Wool, fine or coarse animal hair; horsehair yarn and woven fabric"),
    ch("52", "XI", "Cotton"),
    ch("53", "XI", "Other vegetable textile fibres; paper yarn"),
    ch("54", "XI", "Man-made filaments"),
    ch("55", "XI", "Man-made staple fibres"),
    ch("56", "XI", "Wadding, felt and nonwovens; special yarns; twine, cordage, ropes"),
    ch("57", "XI", "Carpets and other textile floor coverings"),
    ch("58", "XI", "Special woven fabrics; tufted textile fabrics; lace; embroidery"),
    ch("59", "XI", "Impregnated, coated, covered or laminated textile fabrics"),
    ch("60", "XI", "Knitted or crocheted fabrics"),
    ch("61", "XI", "Articles of apparel and clothing accessories, knitted or crocheted"),
    ch("62", "XI", "Articles of apparel and clothing accessories, not knitted or crocheted"),
    ch("63", "XI", "Other made up textile articles; worn clothing"),
    ch("64", "XII", "Footwear, gaiters and the like"),
    ch("65", "XII", "Headgear and parts thereof"),
    ch("66", "XII", "Umbrellas, sun umbrellas, walking sticks, whips"),
    ch("67", "XII", "Prepared feathers and down; artificial flowers"),
    ch("68", "XIII", "Articles of stone, plaster, cement, asbestos, mica"),
    ch("69", "XIII", "Ceramic products"),
    ch("70", "XIII", "Glass and glassware"),
    ch("71", "XIV", "Natural or cultured pearls, precious stones and metals; jewellery"),
    ch("72", "XV", "Iron and steel"),
    ch("73", "XV", "Articles of iron or steel"),
    ch("74", "XV", "Copper and articles thereof"),
    ch("75", "XV", "Nickel and articles thereof"),
    ch("76", "XV", "Aluminium and articles thereof"),
    ch("78", "XV", "Lead and articles thereof"),
    ch("79", "XV", "Zinc and articles thereof"),
    ch("80", "XV", "Tin and articles thereof"),
    ch("81", "XV", "Other base metals; cermets; articles thereof"),
    ch("82", "XV", "Tools, implements, cutlery, spoons and forks, of base metal"),
    ch("83", "XV", "Miscellaneous articles of base metal"),
    ch("84", "XVI", "Nuclear reactors, boilers, machinery and mechanical appliances"),
    ch("85", "XVI", "Electrical machinery and equipment; sound and television apparatus"),
    ch("86", "XVII", "Railway or tramway locomotives, rolling stock and track fixtures"),
    ch("87", "XVII", "Vehicles other than railway or tramway rolling stock"),
    ch("88", "XVII", "Aircraft, spacecraft, and parts thereof"),
    ch("89", "XVII", "Ships, boats and floating structures"),
    ch("90", "XVIII", "Optical, photographic, measuring, checking, medical instruments"),
    ch("91", "XVIII", "Clocks and watches and parts thereof"),
    ch("92", "XVIII", "Musical instruments; parts and accessories"),
    ch("93", "XIX", "Arms and ammunition; parts and accessories thereof"),
    ch("94", "XX", "Furniture; bedding, mattresses; lamps; prefabricated buildings"),
    ch("95", "XX", "Toys, games and sports requisites"),
    ch("96", "XX", "Miscellaneous manufactured articles"),
    ch("97", "XXI", "Works of art, collectors' pieces and antiques"),
    ch("98", "XXI", "Project imports; laboratory chemicals; passengers' baggage"),
    ch("99", "SAC", "Services"),
];

/// A curated HSN code. Rates are stored in hundredths of a percent.
struct HsnEntry {
    code: &'static str,
    description: &'static str,
    rate: u32,
    cess: Option<u32>,
    unit: &'static str,
}

const fn hsn(code: &'static str, description: &'static str, rate: u32, unit: &'static str) -> HsnEntry {
    HsnEntry {
        code,
        description,
        rate,
        cess: None,
        unit,
    }
}

const fn hsn_cess(
    code: &'static str,
    description: &'static str,
    rate: u32,
    cess: u32,
    unit: &'static str,
) -> HsnEntry {
    HsnEntry {
        code,
        description,
        rate,
        cess: Some(cess),
        unit,
    }
}

/// Sorted by code for binary search
static HSN_TABLE: &[HsnEntry] = &[
    hsn("0401", "Milk and cream, not concentrated", 0, "LTR"),
    hsn("0402", "Milk and cream, concentrated or sweetened", 500, "KGS"),
    hsn("0405", "Butter and other fats derived from milk", 1200, "KGS"),
    hsn("0406", "Cheese and curd", 1200, "KGS"),
    hsn("0701", "Potatoes, fresh or chilled", 0, "KGS"),
    hsn("0713", "Dried leguminous vegetables, shelled", 0, "KGS"),
    hsn("0803", "Bananas, including plantains, fresh or dried", 0, "KGS"),
    hsn("0901", "Coffee, roasted or decaffeinated", 500, "KGS"),
    hsn("0902", "Tea, whether or not flavoured", 500, "KGS"),
    hsn("1001", "Wheat and meslin", 0, "KGS"),
    hsn("1006", "Rice", 0, "KGS"),
    hsn("1101", "Wheat or meslin flour", 0, "KGS"),
    hsn("1701", "Cane or beet sugar", 500, "KGS"),
    hsn("1704", "Sugar confectionery not containing cocoa", 1800, "KGS"),
    hsn("1806", "Chocolate and other food preparations containing cocoa", 1800, "KGS"),
    hsn("1905", "Bread, pastry, cakes, biscuits and other bakers' wares", 1800, "KGS"),
    hsn("190531", "Sweet biscuits", 1800, "KGS"),
    hsn("2106", "Food preparations not elsewhere specified", 1800, "KGS"),
    hsn("2201", "Mineral waters and aerated waters, not sweetened", 1800, "LTR"),
    hsn_cess("2202", "Aerated waters containing added sugar or flavouring", 2800, 1200, "LTR"),
    hsn_cess("240220", "Cigarettes containing tobacco", 2800, 500, "NOS"),
    hsn("2523", "Portland cement, aluminous cement and similar hydraulic cements", 2800, "KGS"),
    hsn("2710", "Petroleum oils, other than crude", 1800, "LTR"),
    hsn("3004", "Medicaments put up in measured doses or packings", 1200, "NOS"),
    hsn("300490", "Other medicaments for therapeutic or prophylactic uses", 1200, "NOS"),
    hsn("3304", "Beauty or make-up preparations", 1800, "NOS"),
    hsn("3305", "Preparations for use on the hair", 1800, "NOS"),
    hsn("3401", "Soap and organic surface-active products", 1800, "KGS"),
    hsn("3402", "Washing and cleaning preparations", 1800, "KGS"),
    hsn("3923", "Plastic articles for the conveyance or packing of goods", 1800, "NOS"),
    hsn("4011", "New pneumatic tyres, of rubber", 2800, "NOS"),
    hsn("4202", "Trunks, suitcases, handbags and similar containers", 1800, "NOS"),
    hsn("4802", "Uncoated paper and paperboard for writing or printing", 1200, "KGS"),
    hsn("4820", "Registers, account books, notebooks and exercise books", 1200, "NOS"),
    hsn("4901", "Printed books, brochures and leaflets", 0, "NOS"),
    hsn("5208", "Woven fabrics of cotton, not more than 200 g/m2", 500, "MTR"),
    hsn("6109", "T-shirts, singlets and other vests, knitted", 500, "NOS"),
    hsn("6203", "Men's suits, jackets, trousers and shorts", 1200, "NOS"),
    hsn("6403", "Footwear with uppers of leather", 1800, "PRS"),
    hsn("6907", "Ceramic flags and paving, hearth or wall tiles", 1800, "SQM"),
    hsn("7113", "Articles of jewellery of precious metal", 300, "GMS"),
    hsn("7210", "Flat-rolled products of iron, clad, plated or coated", 1800, "KGS"),
    hsn("7308", "Structures and parts of structures of iron or steel", 1800, "KGS"),
    hsn("7323", "Table, kitchen or household articles of iron or steel", 1200, "NOS"),
    hsn("8414", "Air or vacuum pumps, compressors and fans", 1800, "NOS"),
    hsn("8415", "Air conditioning machines", 2800, "NOS"),
    hsn("8418", "Refrigerators, freezers and heat pumps", 1800, "NOS"),
    hsn("8443", "Printing machinery; printers, copying machines", 1800, "NOS"),
    hsn("8450", "Household or laundry-type washing machines", 1800, "NOS"),
    hsn("8471", "Automatic data processing machines and units thereof", 1800, "NOS"),
    hsn("847130", "Portable digital computers weighing not more than 10 kg", 1800, "NOS"),
    hsn("847141", "Digital computers with processing, input and output units", 1800, "NOS"),
    hsn("847160", "Input or output units for data processing machines", 1800, "NOS"),
    hsn("8504", "Electrical transformers, static converters and inductors", 1800, "NOS"),
    hsn("8507", "Electric accumulators, including separators", 1800, "NOS"),
    hsn("8517", "Telephone sets and apparatus for transmission of voice or data", 1800, "NOS"),
    hsn("851713", "Smartphones", 1800, "NOS"),
    hsn("8528", "Monitors, projectors and television receivers", 1800, "NOS"),
    hsn_cess("8703", "Motor cars and other motor vehicles for transport of persons", 2800, 1500, "NOS"),
    hsn_cess("870321", "Motor cars with spark-ignition engine up to 1000 cc", 2800, 100, "NOS"),
    hsn("8711", "Motorcycles and cycles fitted with an auxiliary motor", 2800, "NOS"),
    hsn("8712", "Bicycles and other cycles, not motorised", 1200, "NOS"),
    hsn("9004", "Spectacles, goggles and the like", 1800, "NOS"),
    hsn("9018", "Medical, surgical, dental or veterinary instruments", 1200, "NOS"),
    hsn("9403", "Other furniture and parts thereof", 1800, "NOS"),
    hsn("9503", "Tricycles, scooters, dolls and other toys", 1200, "NOS"),
    hsn("9608", "Ball point pens, felt tipped pens and markers", 1800, "NOS"),
];

impl HsnEntry {
    fn to_hsn_code(&self) -> HsnCode {
        HsnCode {
            code: self.code.to_string(),
            description: self.description.to_string(),
            chapter: self.code[..2].to_string(),
            rate: from_hundredths(self.rate),
            cess: self.cess.map(from_hundredths),
            unit: Some(self.unit.to_string()),
        }
    }
}

/// Strip whitespace and dots, so `8471.30.00` becomes `84713000`
pub fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect()
}

fn find_entry(code: &str) -> Option<&'static HsnEntry> {
    HSN_TABLE
        .binary_search_by(|e| e.code.cmp(code))
        .ok()
        .map(|idx| &HSN_TABLE[idx])
}

/// Chapter metadata for the first two digits of `code`
pub fn chapter(code: &str) -> Option<&'static ChapterInfo> {
    let code = normalize_code(code);
    let prefix = code.get(..2)?;
    CHAPTERS
        .binary_search_by(|c| c.code.cmp(prefix))
        .ok()
        .map(|idx| &CHAPTERS[idx])
}

/// All chapters in code order
pub fn chapters() -> &'static [ChapterInfo] {
    CHAPTERS
}

/// Exact lookup of a registered code
pub fn lookup_exact(code: &str) -> Option<HsnCode> {
    find_entry(&normalize_code(code)).map(HsnEntry::to_hsn_code)
}

/// Exact lookup, else the longest registered prefix down to 2 digits
pub fn find_by_prefix(code: &str) -> Option<HsnCode> {
    let code = normalize_code(code);
    if code.len() < 2 || !code.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    (2..=code.len())
        .rev()
        .find_map(|len| find_entry(&code[..len]))
        .map(HsnEntry::to_hsn_code)
}

/// Recommended GST rate of the exact or longest-prefix match
pub fn get_recommended_rate(code: &str) -> Option<BigDecimal> {
    find_by_prefix(code).map(|hsn| hsn.rate)
}

/// Case-insensitive search over code descriptions
pub fn search(query: &str) -> Vec<HsnCode> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    HSN_TABLE
        .iter()
        .filter(|e| e.description.to_lowercase().contains(&query))
        .map(HsnEntry::to_hsn_code)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_sorted() {
        assert!(HSN_TABLE.windows(2).all(|w| w[0].code < w[1].code));
        assert!(CHAPTERS.windows(2).all(|w| w[0].code < w[1].code));
    }

    #[test]
    fn test_every_code_has_a_chapter() {
        for entry in HSN_TABLE {
            assert!(chapter(entry.code).is_some(), "{} has no chapter", entry.code);
            assert!(matches!(entry.code.len(), 4 | 6 | 8));
        }
    }

    #[test]
    fn test_chapter_77_reserved() {
        assert!(chapter("77").is_none());
        assert_eq!(chapter("8471").unwrap().section, "XVI");
        assert_eq!(chapters().len(), 98);
    }

    #[test]
    fn test_exact_lookup() {
        let laptop = lookup_exact("847130").unwrap();
        assert_eq!(laptop.chapter, "84");
        assert_eq!(laptop.rate, BigDecimal::from(18));
        assert!(lookup_exact("84713000").is_none());
    }

    #[test]
    fn test_longest_prefix_wins() {
        let hsn = find_by_prefix("84713000").unwrap();
        assert_eq!(hsn.code, "847130");
        assert_eq!(get_recommended_rate("84713000"), Some(BigDecimal::from(18)));

        let car = find_by_prefix("87032110").unwrap();
        assert_eq!(car.code, "870321");
        assert_eq!(car.cess, Some(BigDecimal::from(1)));

        assert_eq!(find_by_prefix("8703 90 10").unwrap().code, "8703");
    }

    #[test]
    fn test_unknown_codes() {
        assert!(get_recommended_rate("5555").is_none());
        assert!(get_recommended_rate("8").is_none());
        assert!(get_recommended_rate("84AB").is_none());
    }

    #[test]
    fn test_dotted_codes() {
        assert_eq!(find_by_prefix("8471.30.00").unwrap().code, "847130");
    }

    #[test]
    fn test_search() {
        let results = search("smartphone");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code, "851713");
        assert!(search("  ").is_empty());
    }
}
