use std::str::FromStr;

use super::*;

impl FromRequest for job::Model {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let job_id = req.match_info().get("job_id").expect("This extractor must be used under `job_id` path");
            let Ok(job_id) = Uuid::from_str(job_id) else {
                return Err(Error::Validation("invalid `job_id`".to_owned()).into())
            };

            let db = req.app_data::<web::Data<DatabaseConnection>>().expect("DatabaseConnection must be attached");

            let Some(job) = Job::find_by_id(job_id)
                .one(db.as_ref()).await
                .map_err(Error::from)?
            else {
                return Err(Error::NotFound("job").into())
            };

            Ok(job)
        })
    }
}
