use serde::Serialize;

/// A Carrefour jeunesse-emploi office. The list is fixed at build time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Office {
    pub id: &'static str,
    pub nom: &'static str,
    pub ville: &'static str,
    pub adresse: &'static str,
    pub site_web: &'static str,
    pub telephone: Option<&'static str>,
    pub latitude: f64,
    pub longitude: f64,
}

const SITE: &str = "https://www.trouvetoncje.com/";

pub static OFFICES: [Office; 8] = [
    Office {
        id: "cje-montreal-centre",
        nom: "CJE Montréal Centre-Ville",
        ville: "Montréal",
        adresse: "Centre-ville, Montréal, QC",
        site_web: SITE,
        telephone: Some("514-555-0101"),
        latitude: 45.5048,
        longitude: -73.5720,
    },
    Office {
        id: "cje-capitale-nationale",
        nom: "CJE de la Capitale-Nationale",
        ville: "Québec",
        adresse: "Saint-Roch, Québec, QC",
        site_web: SITE,
        telephone: None,
        latitude: 46.8139,
        longitude: -71.2080,
    },
    Office {
        id: "cje-laval",
        nom: "CJE Laval",
        ville: "Laval",
        adresse: "Chomedey, Laval, QC",
        site_web: SITE,
        telephone: None,
        latitude: 45.5581,
        longitude: -73.7210,
    },
    Office {
        id: "cje-longueuil",
        nom: "CJE Longueuil",
        ville: "Longueuil",
        adresse: "Vieux-Longueuil, Longueuil, QC",
        site_web: SITE,
        telephone: None,
        latitude: 45.5312,
        longitude: -73.5181,
    },
    Office {
        id: "cje-sherbrooke",
        nom: "CJE de Sherbrooke",
        ville: "Sherbrooke",
        adresse: "Centre-ville, Sherbrooke, QC",
        site_web: SITE,
        telephone: None,
        latitude: 45.4042,
        longitude: -71.8929,
    },
    Office {
        id: "cje-gatineau",
        nom: "CJE de Gatineau",
        ville: "Gatineau",
        adresse: "Secteur Hull, Gatineau, QC",
        site_web: SITE,
        telephone: None,
        latitude: 45.4765,
        longitude: -75.7013,
    },
    Office {
        id: "cje-saguenay",
        nom: "CJE Saguenay",
        ville: "Saguenay",
        adresse: "Chicoutimi, Saguenay, QC",
        site_web: SITE,
        telephone: None,
        latitude: 48.4280,
        longitude: -71.0686,
    },
    Office {
        id: "cje-trois-rivieres",
        nom: "CJE de Trois-Rivières",
        ville: "Trois-Rivières",
        adresse: "Centre-ville, Trois-Rivières, QC",
        site_web: SITE,
        telephone: None,
        latitude: 46.3432,
        longitude: -72.5421,
    },
];

impl Office {
    pub fn maps_link(&self) -> String {
        maps_link(self.latitude, self.longitude)
    }
}

pub fn maps_link(latitude: f64, longitude: f64) -> String {
    format!("https://www.google.com/maps/search/?api=1&query={latitude},{longitude}")
}

pub fn find_office(id: &str) -> Option<&'static Office> {
    OFFICES.iter().find(|o| o.id == id.trim())
}

/// What the API returns for an office: the record plus its map link.
#[derive(Debug, Serialize)]
pub struct OfficeCard {
    #[serde(flatten)]
    pub office: &'static Office,
    pub lien_google_maps: String,
}

impl From<&'static Office> for OfficeCard {
    fn from(office: &'static Office) -> Self {
        Self {
            office,
            lien_google_maps: office.maps_link(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_office_ids_are_unique() {
        for (i, a) in OFFICES.iter().enumerate() {
            assert!(OFFICES[i + 1..].iter().all(|b| b.id != a.id));
        }
    }

    #[test]
    fn test_maps_link_uses_coordinates() {
        let office = find_office("cje-laval").unwrap();
        assert_eq!(
            office.maps_link(),
            "https://www.google.com/maps/search/?api=1&query=45.5581,-73.721"
        );
    }

    #[test]
    fn test_card_serializes_flat_with_camel_case_fields() {
        let card = OfficeCard::from(&OFFICES[0]);
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["id"], "cje-montreal-centre");
        assert_eq!(value["siteWeb"], "https://www.trouvetoncje.com/");
        assert!(value["lien_google_maps"].as_str().unwrap().contains("45.5048"));
        assert!(find_office(" cje-gatineau ").is_some());
        assert!(find_office("cje-inconnu").is_none());
    }
}
