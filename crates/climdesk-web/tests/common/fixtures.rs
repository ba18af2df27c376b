//! Backend payloads in the shapes each service returns

use serde_json::{Value, json};

/// Station backend list: bare array, lowercase statuses
pub fn station_payload() -> Value {
    json!([
        {
            "id": 101,
            "fullName": "Asha Rahman",
            "organization": "Dhaka University",
            "designation": "Lecturer",
            "email": "asha@du.example",
            "phone": "+8801700000001",
            "status": "pending",
            "submitTime": "2024-05-02T08:30:00Z",
            "selectedStations": [{"stationName": "Dhaka"}, {"stationName": "Sylhet"}],
            "selectedParameters": ["Rainfall", "Humidity"],
            "dataFormat": "CSV",
            "timeInterval": "last_30_days"
        },
        {
            "id": "102",
            "name": "Karim Hossain",
            "institution": "Agri Research Institute",
            "email": "karim@ari.example",
            "status": "APPROVED",
            "submitTime": "2024-04-15 10:00:00",
            "selectedStations": "Khulna",
            "startDate": "2023-01-01",
            "endDate": "2023-12-31"
        },
        {
            "id": 103,
            "name": "Nadia Islam",
            "organization": "Climate NGO",
            "status": "declined",
            "remarks": "Outside service area",
            "submitTime": 1_714_000_000_000_i64
        }
    ])
}

/// Historical backend list: `data` envelope, uppercase statuses
pub fn historical_payload() -> Value {
    json!({
        "data": [
            {
                "id": 7,
                "name": "Tanvir Ahmed",
                "organization": "Port Authority",
                "email": "tanvir@port.example",
                "status": "IN_REVIEW",
                "createdAt": "2024-06-01T12:00:00Z",
                "stations": ["Chattogram"],
                "parameters": ["Wind speed"],
                "formats": ["NetCDF"],
                "fromDate": "1990-01-01",
                "toDate": "2000-12-31"
            },
            {
                "id": 8,
                "name": "Rina Das",
                "organization": "Water Board",
                "status": "REJECTED",
                "rejectionReason": "Duplicate request",
                "createdAt": "2024-03-10T09:00:00Z"
            }
        ]
    })
}

/// Secondary backend list: `requests` envelope, title-case statuses
pub fn secondary_payload() -> Value {
    json!({
        "requests": [
            {
                "id": 31,
                "name": "Farhan Kabir",
                "organization": "Crop Modelling Lab",
                "status": "Pending",
                "submittedAt": "2024-06-20T07:45:00Z",
                "purpose": "Yield forecasting",
                "methodology": "Regression against rainfall",
                "dataSources": ["Satellite", "Reanalysis"],
                "dataTypes": ["Rainfall"],
                "fromDate": "2010-01-01",
                "toDate": "2020-12-31"
            }
        ]
    })
}

/// Same station list after request 101 was approved
pub fn station_payload_after_approval() -> Value {
    let mut payload = station_payload();
    if let Some(first) = payload.get_mut(0).and_then(Value::as_object_mut) {
        first.insert("status".to_string(), json!("approved"));
    }
    payload
}
